use super::*;

#[test]
fn intern_is_idempotent() {
    let interner = StringInterner::new();
    let a = interner.intern("hello");
    let b = interner.intern("hello");
    let c = interner.intern("world");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.lookup(a), "hello");
    assert_eq!(interner.lookup(c), "world");
}

#[test]
fn empty_string_is_preinterned() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
    assert_eq!(interner.len(), 1);
}

#[test]
fn interner_is_shareable_across_threads() {
    let interner = StringInterner::new();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for i in 0..50 {
                    interner.intern(&format!("name{i}"));
                }
            });
        }
    });
    // 50 distinct names plus the empty string.
    assert_eq!(interner.len(), 51);
}
