//! Tests for error types

use c2s_train::{Error, ErrorKind};

#[test]
fn test_no_datasets_error() {
    let error = Error::NoDatasets;
    assert_eq!(format!("{error}"), "You have to specify at least 1 dataset.");
    assert_eq!(error.kind(), ErrorKind::InvalidArgument);
    assert!(error.is_graceful());
}

#[test]
fn test_invalid_argument_error() {
    let error = Error::InvalidArgument("cannot select 5 of 3 cells".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Invalid argument"));
    assert!(error_str.contains("5 of 3"));
    assert_eq!(error.kind(), ErrorKind::InvalidArgument);
    assert!(!error.is_graceful());
}

#[test]
fn test_missing_cell_num_error() {
    let error = Error::MissingCellNum { index: 12 };
    assert!(format!("{error}").contains("Entry 12"));
    assert_eq!(error.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn test_collaborator_error_is_transparent() {
    let error = Error::Collaborator(anyhow::anyhow!("trace too short"));
    assert_eq!(format!("{error}"), "trace too short");
    assert_eq!(error.kind(), ErrorKind::CollaboratorFailure);
    assert!(!error.is_graceful());
}

#[test]
fn test_io_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
    let error: Error = io_error.into();
    assert!(format!("{error}").contains("IO error"));
    assert_eq!(error.kind(), ErrorKind::IoFailure);
}

#[test]
fn test_serialization_error_conversion() {
    let json_error = serde_json::from_str::<u32>("x").unwrap_err();
    let error: Error = json_error.into();
    assert!(format!("{error}").contains("Serialization error"));
    assert_eq!(error.kind(), ErrorKind::IoFailure);
}

#[test]
fn test_error_debug_format() {
    let error = Error::InvalidArgument("debug test".to_string());
    let debug_str = format!("{error:?}");
    assert!(debug_str.contains("InvalidArgument"));
}
