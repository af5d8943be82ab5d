use jread::harness::bench::generate_users;
use jread::{locate, step, ArraySteps, JsonType, ReadError};

#[test]
fn test_steps_agree_with_indexed_queries() {
    let json = br#"{"list": [1, "two", {"three": [3]}, [4, 44], null, -6.5e2]}"#;
    let list = locate(json, "{'list'", &[]);
    let stepped: Vec<_> = ArraySteps::new(&list).unwrap().collect();
    assert_eq!(stepped.len(), list.elements());
    for (i, element) in stepped.iter().enumerate() {
        let indexed = locate(json, "{'list' [*", &[i]);
        assert_eq!(*element, indexed, "element {}", i);
    }
}

#[test]
fn test_step_by_hand() {
    let json = b"[ 10 , 20 ]";
    let array = locate(json, "", &[]);
    let mut pos = array.offset() + 1;

    let (first, next) = step(json, pos);
    assert_eq!(first.raw(), b"10");
    pos = next;

    let (second, next) = step(json, pos);
    assert_eq!(second.raw(), b"20");
    pos = next;

    let (end, next) = step(json, pos);
    assert_eq!(end.kind(), JsonType::EndOfArray);
    assert!(end.is_ok());
    assert_eq!(end.raw(), b"]");
    assert_eq!(next, json.len() - 1);
}

#[test]
fn test_empty_array_yields_nothing() {
    let json = b"[   ]";
    let array = locate(json, "", &[]);
    assert_eq!(ArraySteps::new(&array).unwrap().count(), 0);
}

#[test]
fn test_steps_require_an_array() {
    let json = br#"{"a": 1}"#;
    let object = locate(json, "", &[]);
    assert_eq!(
        ArraySteps::new(&object).unwrap_err(),
        ReadError::TypeMismatch
    );

    let missing = locate(json, "{'b'", &[]);
    assert_eq!(
        ArraySteps::new(&missing).unwrap_err(),
        ReadError::KeyNotFound
    );
}

#[test]
fn test_missing_comma_ends_iteration() {
    let json = b"[1, 2 3]";
    let array = ArraySteps::resume(json, 1);
    let elements: Vec<_> = array.collect();
    assert_eq!(elements.len(), 2);
    assert!(elements[0].is_ok());
    assert_eq!(elements[1].raw(), b"2");
    assert_eq!(elements[1].error(), Some(ReadError::ExpectedArrayComma));
}

#[test]
fn test_resume_from_position() {
    let json = b"[1, 2, 3, 4]";
    let array = locate(json, "", &[]);
    let mut steps = ArraySteps::new(&array).unwrap();
    steps.next();
    steps.next();

    let rest: Vec<_> = ArraySteps::resume(json, steps.position())
        .map(|e| e.raw())
        .collect();
    assert_eq!(rest, vec![&b"3"[..], &b"4"[..]]);
}

#[test]
fn test_generated_users_step_in_order() {
    let json = generate_users(25);
    let root = locate(json.as_bytes(), "", &[]);
    for (i, user) in ArraySteps::new(&root).unwrap().enumerate() {
        let id = locate(user.raw(), "{'Id'", &[]);
        assert_eq!(id.as_str(), Some(i.to_string().as_str()));
    }
}

#[test]
fn test_trailing_comma_matches_indexed_query() {
    let json = b"[1,2,]";
    let stepped: Vec<_> = ArraySteps::resume(json, 1).collect();
    assert_eq!(stepped.len(), 3);
    for (i, element) in stepped.iter().enumerate() {
        assert_eq!(*element, locate(json, "[*", &[i]), "element {}", i);
    }
    assert_eq!(stepped[2].error(), Some(ReadError::BadValue));
    assert_eq!(locate(json, "", &[]).error(), Some(ReadError::BadValue));
}

#[test]
fn test_depth_counts_from_stepped_array() {
    let json = b"[[1], [[2]]]";
    let root = jread::Evaluator::new(json).with_max_depth(2).locate("", &[]);
    assert_eq!(root.error(), Some(ReadError::TooDeep));

    let steps = ArraySteps::resume(json, 1).with_max_depth(2);
    let errors: Vec<_> = steps.map(|e| e.error()).collect();
    assert_eq!(errors, vec![None, Some(ReadError::TooDeep)]);
}
