// Integration tests using the fixture documents under tests/ok and tests/bad
use scene_doc::{parse, DocError, ParserError, Reader, Rect, Vector2, Vector3};
use std::fs;
use std::path::PathBuf;

fn get_test_file_path(subdir: &str, filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join(subdir)
        .join(filename)
}

fn read_test_file(subdir: &str, filename: &str) -> String {
    let path = get_test_file_path(subdir, filename);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read test file: {:?}", path))
}

fn load(subdir: &str, filename: &str) -> Reader {
    let mut reader = Reader::new();
    if let Err(err) = reader.load_from_file(get_test_file_path(subdir, filename)) {
        panic!("Failed to load {filename}: {:?}", miette::Report::new(err));
    }
    reader
}

// Documents that must load
mod ok_tests {
    use super::*;

    #[test]
    fn test_primitives() {
        let reader = load("ok", "primitives.json");

        let mut health = 0;
        let mut mass = 0.0f32;
        let mut scale = 0.0f64;
        let mut alive = false;
        let mut name = String::new();
        let mut offset = 0i64;
        assert!(reader.read("health", &mut health));
        assert!(reader.read("mass", &mut mass));
        assert!(reader.read("scale", &mut scale));
        assert!(reader.read("alive", &mut alive));
        assert!(reader.read("name", &mut name));
        assert!(reader.read("offset", &mut offset));
        assert_eq!((health, mass, scale, alive, offset), (100, 72.5, 150.0, true, -3));
        assert_eq!(name, "Ranger");

        // null decodes into nothing
        let mut target = String::from("unchanged");
        assert!(reader.has_key("target"));
        assert!(!reader.read("target", &mut target));
        assert_eq!(target, "unchanged");
    }

    #[test]
    fn test_scene_navigation() {
        let mut reader = load("ok", "scene.json");
        assert_eq!(reader.object_type(), "Scene");

        let mut fov = 0.0f32;
        let mut viewport = Rect::default();
        assert!(reader.begin_object("camera"));
        assert_eq!(reader.object_type(), "Camera");
        assert!(reader.read("fov", &mut fov));
        assert!(reader.read("viewport", &mut viewport));
        reader.end_object();
        assert_eq!(fov, 60.0);
        assert_eq!(viewport, Rect::new(0.0, 0.0, 1280.0, 720.0));

        assert_eq!(reader.array_len("entities"), Some(2));
        assert!(reader.begin_array("entities"));
        let mut names = Vec::new();
        let mut positions = Vec::new();
        while reader.next_array_element() {
            assert_eq!(reader.object_type(), "Entity");
            let mut name = String::new();
            let mut position = Vector3::default();
            reader.read("name", &mut name);
            reader.read("transform.position", &mut position);
            names.push(name);
            positions.push(position);
        }
        reader.end_array();
        assert_eq!(reader.depth(), 1);
        assert_eq!(names, vec!["player", "lamp"]);
        assert_eq!(positions[1], Vector3::new(-4.0, 0.0, 2.5));

        let mut path: Vec<Vector2> = Vec::new();
        assert!(reader.read("path", &mut path));
        assert_eq!(path, vec![Vector2::new(0.0, 0.0), Vector2::new(10.0, 5.0)]);

        let mut projection = scene_doc::Matrix4::from_array([0.0; 16]);
        assert!(reader.read("projection", &mut projection));
        assert_eq!(projection, scene_doc::Matrix4::IDENTITY);
    }

    #[test]
    fn test_edge_cases() {
        let reader = load("ok", "edge_cases.json");

        let mut escapes = String::new();
        assert!(reader.read("escapes", &mut escapes));
        assert_eq!(escapes, "quote \" slash \\ solidus / tab\t nl\n");

        let mut unicode = String::new();
        assert!(reader.read("unicode", &mut unicode));
        assert_eq!(unicode, "?t?");

        let mut raw = String::new();
        assert!(reader.read("raw", &mut raw));
        assert_eq!(raw, "\u{e9}t\u{e9}");

        let mut dup = 0;
        assert!(reader.read("dup", &mut dup));
        assert_eq!(dup, 2);

        let mut big = 0i64;
        let mut small = 0i64;
        assert!(reader.read("big", &mut big));
        assert!(reader.read("small", &mut small));
        assert_eq!((big, small), (i64::MAX, i64::MIN));

        // does not fit in an i32
        let mut narrow = 0i32;
        assert!(!reader.read("big", &mut narrow));

        assert_eq!(reader.array_len("empty_array"), Some(0));
        assert_eq!(reader.array_len("nested"), Some(2));
        let mut empty_object_keys = Reader::from_document(reader.document().clone());
        assert!(empty_object_keys.begin_object("empty_object"));
        assert!(empty_object_keys.keys().is_empty());
        assert_eq!(empty_object_keys.object_type(), "");
    }
}

// Documents that must be rejected
mod bad_tests {
    use super::*;

    fn parse_bad(filename: &str) -> ParserError {
        match parse(&read_test_file("bad", filename)) {
            Ok(_) => panic!("{filename} should not parse"),
            Err(DocError::Parser(err)) => err,
            Err(other) => panic!("{filename}: expected a parser error, got {other:?}"),
        }
    }

    #[test]
    fn test_trailing_comma() {
        assert!(matches!(
            parse_bad("trailing_comma.json"),
            ParserError::TrailingComma { .. }
        ));
    }

    #[test]
    fn test_missing_comma() {
        assert!(matches!(
            parse_bad("missing_comma.json"),
            ParserError::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn test_unclosed_object() {
        assert!(matches!(
            parse_bad("unclosed_object.json"),
            ParserError::UnexpectedEof { .. }
        ));
    }

    #[test]
    fn test_array_root() {
        assert!(matches!(
            parse_bad("array_root.json"),
            ParserError::RootNotObject { .. }
        ));
    }

    #[test]
    fn test_unterminated_string() {
        assert!(matches!(
            parse_bad("unterminated_string.json"),
            ParserError::UnterminatedString { .. }
        ));
    }

    #[test]
    fn test_bad_literal() {
        assert!(matches!(
            parse_bad("bad_literal.json"),
            ParserError::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn test_two_roots() {
        assert!(matches!(
            parse_bad("two_roots.json"),
            ParserError::TrailingCharacters { .. }
        ));
    }

    #[test]
    fn test_integer_overflow() {
        match parse_bad("integer_overflow.json") {
            ParserError::InvalidNumber { text, .. } => assert_eq!(text, "99999999999999999999"),
            other => panic!("Expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn test_failed_load_leaves_reader_empty() {
        let mut reader = load("ok", "primitives.json");
        assert!(reader.has_key("health"));
        let result = reader.load_from_file(get_test_file_path("bad", "trailing_comma.json"));
        assert!(result.is_err());
        assert!(!reader.has_key("health"));
        assert!(reader.document().is_empty());
    }
}
