/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;
use sion_tools::errors::{AppError, ExtractError, ScaleError};

#[test]
fn test_scaleError_unknownDocumentType_shouldDisplayCorrectly() {
    let error = ScaleError::UnknownDocumentType("model".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Unknown document type"));
    assert!(display.contains("model"));
}

#[test]
fn test_scaleError_invalidNumber_shouldDisplayElementAndValue() {
    let error = ScaleError::InvalidNumber {
        element: "position".to_string(),
        attribute: "y".to_string(),
        value: "abc".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("position"));
    assert!(display.contains("'y'"));
    assert!(display.contains("abc"));
}

#[test]
fn test_extractError_parse_shouldDisplayFile() {
    let error = ExtractError::Parse {
        file: PathBuf::from("ui/menu.layout"),
        message: "mismatched tag".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("menu.layout"));
    assert!(display.contains("mismatched tag"));
}

#[test]
fn test_appError_fromScaleError_shouldWrapCorrectly() {
    let app_error: AppError = ScaleError::MissingPosition { index: 3 }.into();
    match app_error {
        AppError::Scale(ScaleError::MissingPosition { index }) => assert_eq!(index, 3),
        other => panic!("Expected AppError::Scale, got {:?}", other),
    }
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
    let app_error: AppError = io_error.into();
    assert!(matches!(app_error, AppError::File(ref message) if message.contains("read-only")));
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknownError() {
    let app_error: AppError = anyhow::anyhow!("something odd").into();
    assert!(format!("{}", app_error).contains("something odd"));
}
