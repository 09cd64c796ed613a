use crate::error::DocError;
use crate::node::Document;
use crate::parser::{ParseOptions, Parser};

/// Parses `source` into a standalone [`Document`].
///
/// This is the stateless counterpart of [`Reader::load_from_string`](crate::Reader::load_from_string)
/// for callers that walk the tree themselves.
///
/// # Errors
///
/// Returns a `DocError::Parser` describing the first syntax error.
pub fn parse(source: &str) -> Result<Document, DocError> {
    parse_with_options(source, ParseOptions::default())
}

/// [`parse`] with an explicit depth limit and diagnostic source name.
///
/// # Errors
///
/// Returns a `DocError::Parser` describing the first syntax error.
pub fn parse_with_options(source: &str, options: ParseOptions) -> Result<Document, DocError> {
    Ok(Parser::with_options(source, options).parse_document()?)
}
