use super::*;

fn two_buffers() -> (SourceMap, BufferId, BufferId) {
    let mut map = SourceMap::new();
    let a = map.add_buffer("a.lark", "let x = 1\n").unwrap();
    let b = map.add_buffer("b.lark", "func f() {}").unwrap();
    (map, a, b)
}

#[test]
fn buffers_get_disjoint_ranges() {
    let (map, a, b) = two_buffers();
    let a = map.buffer(a);
    let b = map.buffer(b);
    assert_eq!(a.base(), 0);
    assert_eq!(a.end(), 10);
    // One-byte gap after the end-of-input offset of `a`.
    assert_eq!(b.base(), 11);
    assert_eq!(b.end(), 22);
}

#[test]
fn find_buffer_containing_resolves_every_offset() {
    let (map, a, b) = two_buffers();
    assert_eq!(map.find_buffer_containing(0), Some(a));
    assert_eq!(map.find_buffer_containing(10), Some(a));
    assert_eq!(map.find_buffer_containing(11), Some(b));
    assert_eq!(map.find_buffer_containing(22), Some(b));
    assert_eq!(map.find_buffer_containing(23), None);
}

#[test]
fn find_buffer_containing_empty_map() {
    let map = SourceMap::new();
    assert_eq!(map.find_buffer_containing(0), None);
}

#[test]
fn slice_uses_global_offsets() {
    let (map, _, b) = two_buffers();
    let b = map.buffer(b);
    assert_eq!(b.slice(Span::new(11, 15)), "func");
    assert_eq!(b.slice(Span::new(0, 4)), "");
    assert_eq!(b.byte_at(16), Some(b'f'));
    assert_eq!(b.byte_at(22), None);
}

#[test]
fn line_col_and_line_text() {
    let mut map = SourceMap::new();
    let id = map.add_buffer("m.lark", "a\nbc\n\nd").unwrap();
    let buf = map.buffer(id);
    assert_eq!(buf.line_col(0), (1, 1));
    assert_eq!(buf.line_col(3), (2, 2));
    assert_eq!(buf.line_col(5), (3, 1));
    assert_eq!(buf.line_col(6), (4, 1));
    assert_eq!(buf.line_text(2), "bc");
    assert_eq!(buf.line_text(3), "");
    assert_eq!(buf.line_text(4), "d");
    assert_eq!(buf.line_text(9), "");
}

#[test]
fn error_display_names_buffer() {
    let err = SourceMapError::OffsetOverflow {
        name: "huge.lark".to_owned(),
        len: 7,
    };
    assert!(err.to_string().contains("huge.lark"));
}
