use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_builder_chain() {
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("boom")
        .with_secondary_label(Span::new(0, 1), "context")
        .with_label(Span::new(4, 6), "here")
        .with_note("a note");

    assert_eq!(diag.primary_span(), Some(Span::new(4, 6)));
    assert_eq!(diag.notes, vec!["a note".to_owned()]);
}

#[test]
fn test_unclosed_delimiter_labels_opener() {
    let diag = unclosed_delimiter(Span::new(3, 4), Span::new(10, 10), '(');
    assert_eq!(diag.code, ErrorCode::E1003);
    assert_eq!(diag.primary_span(), Some(Span::new(10, 10)));
    let secondary: Vec<_> = diag.labels.iter().filter(|l| !l.is_primary).collect();
    assert_eq!(secondary.len(), 1);
    assert_eq!(secondary[0].span, Span::new(3, 4));
    assert!(diag.labels[0].message.contains(')'));
}

#[test]
fn test_unexpected_separator_has_removal_fix() {
    let diag = unexpected_separator(Span::new(5, 6), ",");
    assert_eq!(diag.code, ErrorCode::E1005);
    assert_eq!(diag.fixes.len(), 1);
    let sub = &diag.fixes[0].substitutions[0];
    assert!(sub.is_removal());
    assert_eq!(sub.span, Span::new(5, 6));
}

#[test]
fn test_expected_separator_has_insertion_fix() {
    let diag = expected_separator(Span::new(8, 9), Span::point(7), ",");
    assert_eq!(diag.code, ErrorCode::E1006);
    assert_eq!(diag.primary_span(), Some(Span::new(8, 9)));
    let sub = &diag.fixes[0].substitutions[0];
    assert!(sub.is_insertion());
    assert_eq!(sub.snippet, ",");
    assert_eq!(sub.span, Span::point(7));
}

#[test]
fn test_display() {
    let diag = unexpected_token(Span::new(1, 2), "`)`", "}");
    let text = diag.to_string();
    assert!(text.starts_with("error [E1001]: unexpected token"));
    assert!(text.contains("--> 1..2"));
}
