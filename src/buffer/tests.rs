use super::*;

fn contents(buf: &GapBuffer) -> String {
    String::from_utf8(buf.to_bytes()).unwrap()
}

fn insert_at(buf: &mut GapBuffer, at: usize, bytes: &[u8]) {
    buf.grow_gap(bytes.len());
    buf.move_gap(at);
    buf.fill(bytes);
}

#[test]
fn test_new_is_empty() {
    let buf = GapBuffer::new();
    assert!(buf.is_empty());
    assert_eq!(buf.len(), 0);
    assert!(buf.gap_len() >= crate::constants::buffer::GAP_HEADROOM);
}

#[test]
fn test_from_bytes_content_flush_at_end() {
    let buf = GapBuffer::from_bytes(b"hello");
    assert_eq!(buf.len(), 5);
    assert_eq!(contents(&buf), "hello");
    // Gap (and cursor) start at offset 0
    assert_eq!(buf.gap_start(), 0);
    assert_eq!(buf.end() - buf.gap_end(), 5);
}

#[test]
fn test_move_gap_preserves_content() {
    let mut buf = GapBuffer::from_bytes(b"hello world");
    for to in [5, 0, 11, 3, 3, 8] {
        buf.move_gap(to);
        assert_eq!(buf.gap_start(), to);
        assert_eq!(contents(&buf), "hello world");
        assert!(buf.gap_start() <= buf.gap_end());
        assert!(buf.gap_end() <= buf.end());
    }
}

#[test]
fn test_fill_inserts_at_gap() {
    let mut buf = GapBuffer::new();
    insert_at(&mut buf, 0, b"world");
    insert_at(&mut buf, 0, b"hello ");
    assert_eq!(contents(&buf), "hello world");
    assert_eq!(buf.gap_start(), 6);
}

#[test]
fn test_insert_at_end_appends() {
    let mut buf = GapBuffer::from_bytes(b"abc");
    insert_at(&mut buf, 3, b"def");
    assert_eq!(contents(&buf), "abcdef");
}

#[test]
fn test_grow_gap_doubles_until_fit() {
    let mut buf = GapBuffer::from_bytes(b"abc");
    let big = vec![b'x'; 3 * INITIAL_CAPACITY];
    insert_at(&mut buf, 3, &big);
    assert_eq!(buf.len(), 3 + big.len());
    assert!(buf.gap_len() >= GAP_HEADROOM);
    assert_eq!(&buf.to_bytes()[..3], b"abc");
}

#[test]
fn test_grow_gap_noop_when_roomy() {
    let mut buf = GapBuffer::new();
    let end = buf.end();
    assert_eq!(buf.grow_gap(16), 0);
    assert_eq!(buf.end(), end);
}

#[test]
fn test_grow_gap_reports_lower_shift() {
    let mut buf = GapBuffer::from_bytes(b"hello world");
    buf.move_gap(5);
    let old_gap_end = buf.gap_end();
    let shift = buf.grow_gap(4 * INITIAL_CAPACITY);
    assert!(shift > 0);
    assert_eq!(buf.gap_end(), old_gap_end + shift);
    assert_eq!(contents(&buf), "hello world");
}

#[test]
fn test_delete_before_gap() {
    let mut buf = GapBuffer::from_bytes(b"hello world");
    buf.move_gap(11);
    let removed = buf.delete(0, 6);
    assert_eq!(removed, b"hello ");
    assert_eq!(contents(&buf), "world");
}

#[test]
fn test_delete_after_gap() {
    let mut buf = GapBuffer::from_bytes(b"hello world");
    buf.move_gap(0);
    let removed = buf.delete(5, 11);
    assert_eq!(removed, b" world");
    assert_eq!(contents(&buf), "hello");
}

#[test]
fn test_delete_straddling_gap() {
    let mut buf = GapBuffer::from_bytes(b"hello world");
    buf.move_gap(5);
    let removed = buf.delete(3, 8);
    assert_eq!(removed, b"lo wo");
    assert_eq!(contents(&buf), "helrld");
    assert_eq!(buf.gap_start(), 3);
}

#[test]
fn test_delete_empty_range_is_noop() {
    let mut buf = GapBuffer::from_bytes(b"abc");
    let removed = buf.delete(1, 1);
    assert!(removed.is_empty());
    assert_eq!(contents(&buf), "abc");
}

#[test]
fn test_byte_at_spans_gap() {
    let mut buf = GapBuffer::from_bytes(b"abcdef");
    buf.move_gap(3);
    let got: Vec<u8> = (0..buf.len()).map(|i| buf.byte_at(i)).collect();
    assert_eq!(got, b"abcdef");
}

#[test]
fn test_slice_at_stops_at_section_edge() {
    let mut buf = GapBuffer::from_bytes(b"abcdef");
    buf.move_gap(3);
    assert_eq!(buf.slice_at(0), b"abc");
    assert_eq!(buf.slice_at(2), b"c");
    assert_eq!(buf.slice_at(3), b"def");
    assert_eq!(buf.slice_at(6), b"");
}

#[test]
fn test_copy_range_spans_gap() {
    let mut buf = GapBuffer::from_bytes(b"hello world");
    buf.move_gap(5);
    assert_eq!(buf.copy_range(0, 11), b"hello world");
    assert_eq!(buf.copy_range(3, 8), b"lo wo");
    assert_eq!(buf.copy_range(0, 5), b"hello");
    assert_eq!(buf.copy_range(5, 11), b" world");
    assert_eq!(buf.copy_range(7, 7), b"");
}

#[test]
fn test_span_compact_expand() {
    let mut buf = GapBuffer::from_bytes(b"hello world");
    buf.move_gap(5);
    let span = buf.span();
    // Logical length is invariant under gap position
    assert_eq!(span.compact(buf.end()), buf.len());
    // Both gap edges collapse to the same logical offset
    assert_eq!(span.compact(span.start), span.compact(span.end));
    for logical in [0, 3, 5, 8, 11] {
        assert_eq!(span.compact(span.expand(logical)), logical);
    }
}
