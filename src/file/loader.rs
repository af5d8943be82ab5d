//! JSON buffer loading.
//!
//! jread works on raw bytes, so loading is nothing more than getting a
//! file's contents into memory: no parsing or UTF-8 validation happens here.
//! Gzipped input is decompressed transparently.

use anyhow::{bail, Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Loads a JSON file from the filesystem into a byte buffer.
///
/// Files ending in `.gz` are decompressed. Inputs whose (decompressed) size
/// is `max_len` bytes or more are rejected.
///
/// # Examples
///
/// ```no_run
/// use jread::file::loader::load_json_file;
///
/// let buf = load_json_file("config.json", 1024 * 1024).unwrap();
/// let name = jread::locate(&buf, "{'name'", &[]);
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist or cannot be read
/// - The file is gzipped but corrupted
/// - The content is too large
pub fn load_json_file<P: AsRef<Path>>(path: P, max_len: usize) -> Result<Vec<u8>> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let data = if is_gzipped {
        read_gzipped_file(path_ref, max_len)?
    } else {
        let len = fs::metadata(path_ref).context("Failed to read file")?.len();
        check_size(len, max_len)?;
        fs::read(path_ref).context("Failed to read file")?
    };

    log::debug!("loaded {} bytes from {}", data.len(), path_ref.display());
    Ok(data)
}

/// Loads JSON from standard input into a byte buffer.
///
/// Gzipped input is detected by its magic bytes (0x1f 0x8b).
///
/// # Errors
///
/// Returns an error if reading stdin fails, the gzip stream is corrupted,
/// or the content is too large.
pub fn load_json_from_stdin(max_len: usize) -> Result<Vec<u8>> {
    let stdin = std::io::stdin();
    let buffer = read_limited(stdin.lock(), max_len, "Failed to read from stdin")?;

    let data = if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer, max_len)?
    } else {
        buffer
    };

    log::debug!("loaded {} bytes from stdin", data.len());
    Ok(data)
}

/// Loads from stdin when `path` is `-`, otherwise from the named file.
pub fn load_json<P: AsRef<Path>>(path: P, max_len: usize) -> Result<Vec<u8>> {
    if path.as_ref() == Path::new("-") {
        load_json_from_stdin(max_len)
    } else {
        load_json_file(path, max_len)
    }
}

fn check_size(len: u64, max_len: usize) -> Result<()> {
    if len >= max_len as u64 {
        bail!(
            "JSON input is too large ({} bytes, limit is {} bytes)",
            len,
            max_len
        );
    }
    Ok(())
}

/// Reads at most `max_len` bytes, failing if the limit is reached.
fn read_limited<R: Read>(reader: R, max_len: usize, context: &'static str) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    reader
        .take(max_len as u64)
        .read_to_end(&mut data)
        .context(context)?;
    check_size(data.len() as u64, max_len)?;
    Ok(data)
}

/// Reads and decompresses a gzipped file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file is not valid gzip format (corrupted)
/// - The decompressed content is too large
fn read_gzipped_file<P: AsRef<Path>>(path: P, max_len: usize) -> Result<Vec<u8>> {
    use flate2::read::GzDecoder;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    read_limited(
        GzDecoder::new(file),
        max_len,
        "Failed to decompress gzipped file - file may be corrupted",
    )
}

fn decompress_gzip_bytes(bytes: &[u8], max_len: usize) -> Result<Vec<u8>> {
    use flate2::read::GzDecoder;

    read_limited(
        GzDecoder::new(bytes),
        max_len,
        "Failed to decompress gzipped stdin",
    )
}
