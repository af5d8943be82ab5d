use flate2::write::GzEncoder;
use flate2::Compression;
use jread::file::loader::{load_json, load_json_file};
use jread::{locate, JsonType};
use std::fs;
use std::io::Write;
use tempfile::TempDir;

const JSON: &str = r#"{"name": "jread", "tags": ["json", "reader"], "size": 3}"#;

fn write_gzip(path: &std::path::Path, data: &[u8]) {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    fs::write(path, encoder.finish().unwrap()).unwrap();
}

#[test]
fn test_load_and_locate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("doc.json");
    fs::write(&path, JSON).unwrap();

    let buf = load_json_file(&path, 1024).unwrap();
    let tags = locate(&buf, "{'tags'", &[]);
    assert_eq!(tags.kind(), JsonType::Array);
    assert_eq!(tags.elements(), 2);
    assert_eq!(locate(&buf, "{'tags' [1", &[]).raw(), br#""reader""#);
}

#[test]
fn test_gzip_matches_plain() {
    let dir = TempDir::new().unwrap();
    let plain = dir.path().join("doc.json");
    let gzipped = dir.path().join("doc.json.gz");
    fs::write(&plain, JSON).unwrap();
    write_gzip(&gzipped, JSON.as_bytes());

    let a = load_json(&plain, 1024).unwrap();
    let b = load_json(&gzipped, 1024).unwrap();
    assert_eq!(a, b);
    assert_eq!(locate(&b, "{'size'", &[]).raw(), b"3");
}

#[test]
fn test_size_limit() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("doc.json");
    fs::write(&path, JSON).unwrap();

    let err = load_json_file(&path, JSON.len()).unwrap_err();
    assert!(err.to_string().contains("too large"));
    assert!(load_json_file(&path, JSON.len() + 1).is_ok());
}

#[test]
fn test_gzip_size_limit_applies_to_decompressed_data() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("big.json.gz");
    let big = format!("[{}0]", "0,".repeat(5000));
    write_gzip(&path, big.as_bytes());

    assert!(fs::metadata(&path).unwrap().len() < 1000);
    assert!(load_json_file(&path, 1000).is_err());
}

#[test]
fn test_missing_file() {
    assert!(load_json_file("/nonexistent/doc.json", 1024).is_err());
}
