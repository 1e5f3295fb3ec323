use super::*;

#[test]
fn test_all_variants_classified() {
    for code in ErrorCode::ALL {
        let classes = [
            code.is_lexer_error(),
            code.is_parser_error(),
            code.is_internal_error(),
        ];
        assert_eq!(
            classes.iter().filter(|&&c| c).count(),
            1,
            "{code} must belong to exactly one phase"
        );
    }
}

#[test]
fn test_display_matches_as_str() {
    for code in ErrorCode::ALL {
        assert_eq!(code.to_string(), code.as_str());
        assert!(!code.description().is_empty());
    }
}

#[test]
fn test_codes_are_unique() {
    let mut seen: Vec<&str> = ErrorCode::ALL.iter().map(ErrorCode::as_str).collect();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), ErrorCode::ALL.len());
}
