use super::*;
use crossbeam::scope;
use std::sync::Mutex;

fn contents(v: &DynamicArray) -> Vec<String> {
    (0..v.len()).map(|i| v.read(i).unwrap().to_string()).collect()
}

#[test]
fn test_append_read() {
    let mut v = DynamicArray::new().unwrap();
    v.append("a").unwrap();
    v.append("b").unwrap();
    v.append("c").unwrap();
    assert_eq!(v.len(), 3);
    assert_eq!(v.read(0).unwrap(), "a");
    assert_eq!(v.read(1).unwrap(), "b");
    assert_eq!(v.read(2).unwrap(), "c");
}

#[test]
fn test_insert_shifts_right() {
    let mut v = DynamicArray::with_capacity(4).unwrap();
    v.append("a").unwrap();
    v.append("c").unwrap();
    v.insert("b", 1).unwrap();
    assert_eq!(contents(&v), ["a", "b", "c"]);
    v.insert("z", 0).unwrap();
    assert_eq!(contents(&v), ["z", "a", "b", "c"]);
    v.insert("end", 4).unwrap();
    assert_eq!(contents(&v), ["z", "a", "b", "c", "end"]);
}

#[test]
fn test_insert_past_end_is_rejected() {
    let mut v = DynamicArray::new().unwrap();
    v.append("a").unwrap();
    assert_eq!(
        v.insert("x", 2),
        Err(ArrayError::IndexOutOfRange { index: 2, len: 1 })
    );
    assert_eq!(contents(&v), ["a"]);
    assert_eq!(v.capacity(), 1);
}

#[test]
fn test_remove_first_match_only() {
    let mut v = DynamicArray::new().unwrap();
    for s in ["x", "dup", "y", "dup"] {
        v.append(s).unwrap();
    }
    assert_eq!(v.remove("dup"), Ok(1));
    assert_eq!(contents(&v), ["x", "y", "dup"]);
    assert_eq!(v.remove("dup"), Ok(2));
    assert_eq!(contents(&v), ["x", "y"]);
}

#[test]
fn test_remove_missing_leaves_array_unchanged() {
    let mut v = DynamicArray::with_capacity(2).unwrap();
    v.append("a").unwrap();
    v.append("b").unwrap();
    assert_eq!(v.remove("c"), Err(ArrayError::NotFound("c".to_string())));
    assert_eq!(contents(&v), ["a", "b"]);
    assert_eq!(v.capacity(), 2);
}

#[test]
fn test_remove_last_and_only() {
    let mut v = DynamicArray::new().unwrap();
    v.append("only").unwrap();
    assert_eq!(v.remove("only"), Ok(0));
    assert!(v.is_empty());
    assert_eq!(v.render(), "[]");
    v.append("again").unwrap();
    assert_eq!(v.render(), "[again]");
}

#[test]
fn test_read_out_of_range() {
    let mut v = DynamicArray::with_capacity(8).unwrap();
    assert_eq!(
        v.read(0),
        Err(ArrayError::IndexOutOfRange { index: 0, len: 0 })
    );
    v.append("").unwrap();
    assert_eq!(v.read(0), Ok(""));
    assert!(v.read(1).is_err());
    assert!(v.read(7).is_err());
}

#[test]
fn test_grow_doubles_capacity() {
    let mut v = DynamicArray::with_capacity(2).unwrap();
    assert_eq!(v.capacity(), 2);
    v.append("1").unwrap();
    v.append("2").unwrap();
    assert_eq!(v.capacity(), 2);
    v.append("3").unwrap();
    assert_eq!(v.capacity(), 4);
    for i in 4..=9 {
        v.append(&i.to_string()).unwrap();
    }
    assert_eq!(v.capacity(), 16);
    let expected: Vec<String> = (1..=9).map(|i| i.to_string()).collect();
    assert_eq!(contents(&v), expected);
}

#[test]
fn test_insert_at_front_when_full() {
    let mut v = DynamicArray::new().unwrap();
    v.append("b").unwrap();
    v.insert("a", 0).unwrap();
    assert_eq!(v.capacity(), 2);
    assert_eq!(contents(&v), ["a", "b"]);
}

#[test]
fn test_zero_capacity_rejected() {
    assert!(matches!(
        DynamicArray::with_capacity(0),
        Err(ArrayError::ZeroCapacity)
    ));
}

#[test]
fn test_huge_capacity_is_resource_exhaustion() {
    assert!(matches!(
        DynamicArray::with_capacity(usize::MAX),
        Err(ArrayError::ResourceExhaustion { .. })
    ));
}

#[test]
fn test_elements_are_copies() {
    let mut v = DynamicArray::new().unwrap();
    let mut source = String::from("hello");
    v.append(&source).unwrap();
    source.push_str(" world");
    assert_eq!(v.read(0).unwrap(), "hello");
}

#[test]
fn test_render_and_print_to() {
    let mut v = DynamicArray::new().unwrap();
    assert_eq!(v.render(), "[]");
    v.append("a").unwrap();
    v.append("b").unwrap();
    v.append("c").unwrap();
    assert_eq!(v.render(), "[a,b,c]");
    assert_eq!(format!("{v}"), "[a,b,c]");
    assert_eq!(format!("{v:?}"), r#"["a", "b", "c"]"#);

    let mut out = Vec::new();
    v.print_to(&mut out).unwrap();
    assert_eq!(out, b"[a,b,c]\n");
}

#[test]
fn test_destroy_after_shifts() {
    // Exercises Drop on a buffer whose tail slots were vacated by removals.
    let mut v = DynamicArray::with_capacity(1).unwrap();
    for i in 0..20 {
        v.insert(&format!("s{i}"), i / 2).unwrap();
    }
    for i in (0..20).step_by(3) {
        v.remove(&format!("s{i}")).unwrap();
    }
    assert_eq!(v.len(), 13);
    v.destroy();
}

#[test]
fn test_concurrency() {
    let mut v = DynamicArray::new().unwrap();
    for i in 0..100 {
        v.append(&i.to_string()).unwrap();
    }

    scope(|s| {
        s.spawn(|_| {
            for i in 0..v.len() {
                assert_eq!(v.read(i).unwrap(), i.to_string());
            }
        });
        s.spawn(|_| {
            assert_eq!(v.read(99).unwrap(), "99");
        });
    })
    .unwrap();

    let shared = Mutex::new(v);
    scope(|s| {
        for t in 0..4 {
            let shared = &shared;
            s.spawn(move |_| {
                shared.lock().unwrap().append(&format!("t{t}")).unwrap();
            });
        }
    })
    .unwrap();
    assert_eq!(shared.into_inner().unwrap().len(), 104);
}

#[test]
fn test_logger_initializes_twice() {
    use crate::logger::initialize_logger;
    use tracing::level_filters::LevelFilter;

    assert_eq!(initialize_logger(Some(LevelFilter::WARN)), Ok(()));
    assert_eq!(initialize_logger(Some(LevelFilter::TRACE)), Ok(()));
    assert_eq!(initialize_logger(None), Ok(()));
}

#[test]
fn test_level_from_verbosity() {
    use crate::logger::level_from_verbosity;
    use tracing::level_filters::LevelFilter;

    assert_eq!(level_from_verbosity(0), LevelFilter::WARN);
    assert_eq!(level_from_verbosity(1), LevelFilter::INFO);
    assert_eq!(level_from_verbosity(2), LevelFilter::DEBUG);
    assert_eq!(level_from_verbosity(3), LevelFilter::TRACE);
    assert_eq!(level_from_verbosity(5), LevelFilter::TRACE);
}

#[test]
fn test_out_of_range_keeps_full_index() {
    let v = DynamicArray::new().unwrap();
    let err = v.read(usize::MAX).unwrap_err();
    assert_eq!(
        err,
        ArrayError::IndexOutOfRange { index: usize::MAX as i128, len: 0 }
    );
    assert_eq!(
        err.to_string(),
        format!("index {} out of range for length 0", usize::MAX)
    );
}
