// Error reporting through the public API: error kinds, messages and diagnostics

use miette::{Diagnostic, Report};
use scene_doc::{parse, parse_with_options, DocError, NodeType, ParseOptions, Reader, Writer};

fn reader_for(writer: &Writer) -> Reader {
    let mut reader = Reader::new();
    reader.load_from_string(&writer.to_json()).unwrap();
    reader
}

#[test]
fn test_api_parse_error_is_parser_variant() {
    let result = parse("{ invalid syntax");
    assert!(matches!(result, Err(DocError::Parser(_))));
}

#[test]
fn test_api_get_missing_key() {
    let reader = reader_for(&Writer::new());
    match reader.get::<i32>("missing.deep") {
        Err(DocError::NotFound { key }) => assert_eq!(key, "missing.deep"),
        other => panic!("Expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_api_get_type_mismatch() {
    let mut writer = Writer::new();
    writer.write("name", "hero");
    let reader = reader_for(&writer);
    let err = reader.get::<f32>("name").unwrap_err();
    match &err {
        DocError::TypeMismatch {
            key,
            expected,
            found,
        } => {
            assert_eq!(key, "name");
            assert_eq!(*expected, "float");
            assert_eq!(*found, NodeType::String);
        }
        other => panic!("Expected TypeMismatch, got {other:?}"),
    }
    assert_eq!(err.to_string(), "Key `name` holds string, expected float");
}

#[test]
fn test_api_get_through_a_scalar_is_not_found() {
    let mut writer = Writer::new();
    writer.write("health", 10);
    let reader = reader_for(&writer);
    assert!(matches!(
        reader.get::<i32>("health.max"),
        Err(DocError::NotFound { .. })
    ));
}

#[test]
fn test_api_diagnostic_codes() {
    let err = parse(r#"{ "a": 1, }"#).unwrap_err();
    let code = err.code().map(|c| c.to_string());
    assert_eq!(code.as_deref(), Some("parser::trailing_comma"));

    let reader = reader_for(&Writer::new());
    let err = reader.get::<bool>("flag").unwrap_err();
    let code = err.code().map(|c| c.to_string());
    assert_eq!(code.as_deref(), Some("document::not_found"));
    assert!(err.help().is_some());
}

#[test]
fn test_api_report_names_source() {
    let options = ParseOptions {
        source_name: "level_01.json".to_string(),
        ..ParseOptions::default()
    };
    let err = parse_with_options("{\n  \"a\": tru\n}", options).unwrap_err();
    let rendered = format!("{:?}", Report::new(err));
    assert!(rendered.contains("level_01.json"));
}

#[test]
fn test_api_default_source_name() {
    let err = parse("[]").unwrap_err();
    let rendered = format!("{:?}", Report::new(err));
    assert!(rendered.contains("input.json"));
}

#[test]
fn test_api_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does_not_exist.json");
    let mut reader = Reader::new();
    match reader.load_from_file(&path) {
        Err(DocError::Io { path: reported, source }) => {
            assert_eq!(reported, path);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("Expected Io error, got {other:?}"),
    }
}

#[test]
fn test_api_save_into_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("out.json");
    let writer = Writer::new();
    assert!(matches!(
        writer.save_to_file(&path),
        Err(DocError::Io { .. })
    ));
}
