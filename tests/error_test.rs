use std::io;

use kiln::error::Error;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::TemplateNotFound { name: "react-app".to_string() };
    assert_eq!(err.to_string(), "Template 'react-app' does not exist.");

    let err = Error::CatalogError("invalid catalog".to_string());
    assert_eq!(err.to_string(), "Catalog error: invalid catalog.");

    let err = Error::DirectoryCreationError {
        path: "logs".to_string(),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
    };
    assert_eq!(err.to_string(), "Failed to create directory '/logs': permission denied.");
}

#[test]
fn test_stage_errors_name_their_stage() {
    let cases = [
        (Error::AcquisitionError("timeout".into()), "download"),
        (Error::ExtractionError("bad zip".into()), "extract"),
        (Error::SubstitutionError("locked".into()), "adjust"),
        (Error::DependencyInstallError("exit 1".into()), "install dependencies"),
    ];
    for (err, stage) in cases {
        assert!(err.to_string().contains(stage), "{err}");
    }
}
