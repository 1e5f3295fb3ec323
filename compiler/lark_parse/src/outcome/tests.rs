use super::*;

#[test]
fn test_default_is_success() {
    assert_eq!(ParseStatus::default(), ParseStatus::Success);
}

#[test]
fn test_merge() {
    use ParseStatus::{Error, Success};
    assert_eq!(Success.merge(Success), Success);
    assert_eq!(Success.merge(Error), Error);
    assert_eq!(Error.merge(Success), Error);
    assert_eq!(Error.merge(Error), Error);
}

#[test]
fn test_set_error() {
    let mut status = ParseStatus::Success;
    status.set_error();
    assert!(status.is_error());
    assert!(!status.is_success());
}

#[test]
fn test_from_result() {
    let ok: Result<u8, ()> = Ok(1);
    let err: Result<u8, ()> = Err(());
    assert_eq!(ParseStatus::from(&ok), ParseStatus::Success);
    assert_eq!(ParseStatus::from(&err), ParseStatus::Error);
}

#[test]
fn test_from_error_count() {
    assert_eq!(ParseStatus::from_error_count(0), ParseStatus::Success);
    assert_eq!(ParseStatus::from_error_count(3), ParseStatus::Error);
}
