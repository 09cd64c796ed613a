use crate::node::NodeType;
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DocError {
    #[error("Key `{key}` not found")]
    #[diagnostic(
        code(document::not_found),
        help("Check the key spelling and the object the reader is currently positioned in.")
    )]
    NotFound { key: String },

    #[error("Key `{key}` holds {found}, expected {expected}")]
    #[diagnostic(code(document::type_mismatch))]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: NodeType,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parser(#[from] ParserError),

    #[error("I/O error on {}", .path.display())]
    #[diagnostic(code(document::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum ParserError {
    #[error("Unexpected character")]
    #[diagnostic(
        code(parser::unexpected_token),
        help("The parser found a character it did not expect in this position.")
    )]
    UnexpectedToken {
        #[source_code]
        src: NamedSource<String>,
        #[label("Expected {expected}, but found this")]
        span: SourceSpan,
        expected: String,
    },

    #[error("Unexpected end of input")]
    #[diagnostic(
        code(parser::unexpected_eof),
        help("The input ended while a value, object or array was still open.")
    )]
    UnexpectedEof {
        #[source_code]
        src: NamedSource<String>,
        #[label("Input ended here, expected {expected}")]
        span: SourceSpan,
        expected: String,
    },

    #[error("Unterminated string")]
    #[diagnostic(
        code(parser::unterminated_string),
        help("Add the closing '\"'.")
    )]
    UnterminatedString {
        #[source_code]
        src: NamedSource<String>,
        #[label("String starts here")]
        span: SourceSpan,
    },

    #[error("Invalid escape sequence")]
    #[diagnostic(
        code(parser::invalid_escape),
        help("Supported escapes are \\\" \\\\ \\/ \\b \\f \\n \\r \\t and \\uXXXX.")
    )]
    InvalidEscape {
        #[source_code]
        src: NamedSource<String>,
        #[label("Unknown escape")]
        span: SourceSpan,
    },

    #[error("Invalid number `{text}`")]
    #[diagnostic(code(parser::invalid_number))]
    InvalidNumber {
        #[source_code]
        src: NamedSource<String>,
        #[label("Not a valid number")]
        span: SourceSpan,
        text: String,
    },

    #[error("Trailing comma")]
    #[diagnostic(
        code(parser::trailing_comma),
        help("Remove the comma before the closing bracket or brace.")
    )]
    TrailingComma {
        #[source_code]
        src: NamedSource<String>,
        #[label("This comma is not followed by a value")]
        span: SourceSpan,
    },

    #[error("Document root must be an object")]
    #[diagnostic(code(parser::root_not_object))]
    RootNotObject {
        #[source_code]
        src: NamedSource<String>,
        #[label("Expected '{{' here")]
        span: SourceSpan,
    },

    #[error("Nesting deeper than {limit} levels")]
    #[diagnostic(
        code(parser::nesting_too_deep),
        help("Raise `ParseOptions::max_depth` if this input is trusted.")
    )]
    NestingTooDeep {
        #[source_code]
        src: NamedSource<String>,
        #[label("Limit exceeded here")]
        span: SourceSpan,
        limit: usize,
    },

    #[error("Trailing characters after the document")]
    #[diagnostic(code(parser::trailing_characters))]
    TrailingCharacters {
        #[source_code]
        src: NamedSource<String>,
        #[label("Unexpected content after the root object")]
        span: SourceSpan,
    },
}

impl ParserError {
    /// Byte offset of the error in the parsed source.
    pub fn offset(&self) -> usize {
        match self {
            ParserError::UnexpectedToken { span, .. }
            | ParserError::UnexpectedEof { span, .. }
            | ParserError::UnterminatedString { span, .. }
            | ParserError::InvalidEscape { span, .. }
            | ParserError::InvalidNumber { span, .. }
            | ParserError::TrailingComma { span, .. }
            | ParserError::RootNotObject { span, .. }
            | ParserError::NestingTooDeep { span, .. }
            | ParserError::TrailingCharacters { span, .. } => span.offset(),
        }
    }
}
