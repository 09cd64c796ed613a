use crate::error::ParserError;
use crate::node::{Document, Node, NodeId};
use crate::scanner::{Scanner, StringFault};
use miette::NamedSource;
use std::collections::BTreeMap;

/// Nesting limit applied when no other limit is configured.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Knobs for [`Parser`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    /// Maximum number of nested objects/arrays, root included.
    pub max_depth: usize,
    /// Name shown in diagnostics.
    pub source_name: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            source_name: "input.json".to_string(),
        }
    }
}

/// A recursive descent parser that builds a [`Document`] straight from the
/// raw text.
///
/// ```text
/// Document ::= Object
/// Object   ::= "{" [ String ":" Value { "," String ":" Value } ] "}"
/// Array    ::= "[" [ Value { "," Value } ] "]"
/// Value    ::= Object | Array | String | Number | "true" | "false" | "null"
/// ```
pub struct Parser<'a> {
    source_text: &'a str,
    scanner: Scanner<'a>,
    document: Document,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    pub fn new(source_text: &'a str) -> Self {
        Self::with_options(source_text, ParseOptions::default())
    }

    pub fn with_options(source_text: &'a str, options: ParseOptions) -> Self {
        Self {
            source_text,
            scanner: Scanner::new(source_text),
            document: Document::new(),
            options,
        }
    }

    /// Parses the whole input. Nothing is returned unless every byte of the
    /// input was accepted.
    pub fn parse_document(mut self) -> Result<Document, ParserError> {
        self.scanner.skip_whitespace();
        match self.scanner.peek() {
            None => return self.err_eof("'{'"),
            Some('{') => {}
            Some(_) => {
                return Err(ParserError::RootNotObject {
                    src: self.named_source(),
                    span: (self.scanner.position(), 1).into(),
                })
            }
        }

        let root = self.document.root();
        self.parse_object(root, 1)?;

        self.scanner.skip_whitespace();
        if !self.scanner.is_at_end() {
            let start = self.scanner.position();
            return Err(ParserError::TrailingCharacters {
                src: self.named_source(),
                span: (start, self.source_text.len() - start).into(),
            });
        }
        Ok(self.document)
    }

    /// Value ::= Object | Array | String | Number | Literal
    fn parse_value(&mut self, depth: usize) -> Result<NodeId, ParserError> {
        self.scanner.skip_whitespace();
        match self.scanner.peek() {
            None => self.err_eof("a value"),
            Some('{') => {
                let id = self.document.insert(Node::Object(BTreeMap::new()));
                self.parse_object(id, depth + 1)?;
                Ok(id)
            }
            Some('[') => {
                let id = self.document.insert(Node::Array(Vec::new()));
                self.parse_array(id, depth + 1)?;
                Ok(id)
            }
            Some('"') => {
                let value = self.parse_string()?;
                Ok(self.document.insert(Node::String(value)))
            }
            Some(c) if c == '-' || c.is_ascii_digit() => {
                let node = self.parse_number()?;
                Ok(self.document.insert(node))
            }
            Some(c) if c.is_ascii_alphabetic() => {
                let node = self.parse_literal()?;
                Ok(self.document.insert(node))
            }
            Some(_) => self.err_unexpected("a value"),
        }
    }

    /// Fills the already allocated object `id`. The scanner sits on `{`.
    fn parse_object(&mut self, id: NodeId, depth: usize) -> Result<(), ParserError> {
        self.check_depth(depth)?;
        self.scanner.advance();
        self.scanner.skip_whitespace();
        if self.scanner.eat('}') {
            return Ok(());
        }
        loop {
            self.scanner.skip_whitespace();
            match self.scanner.peek() {
                Some('"') => {}
                None => return self.err_eof("a string key"),
                Some(_) => return self.err_unexpected("a string key"),
            }
            let key = self.parse_string()?;

            self.scanner.skip_whitespace();
            match self.scanner.peek() {
                Some(':') => {
                    self.scanner.advance();
                }
                None => return self.err_eof("':'"),
                Some(_) => return self.err_unexpected("':' after key"),
            }

            let value = self.parse_value(depth)?;
            self.document.set_child(id, &key, value);

            if !self.parse_separator('}')? {
                return Ok(());
            }
        }
    }

    /// Fills the already allocated array `id`. The scanner sits on `[`.
    fn parse_array(&mut self, id: NodeId, depth: usize) -> Result<(), ParserError> {
        self.check_depth(depth)?;
        self.scanner.advance();
        self.scanner.skip_whitespace();
        if self.scanner.eat(']') {
            return Ok(());
        }
        loop {
            let element = self.parse_value(depth)?;
            self.document.push_element(id, element);

            if !self.parse_separator(']')? {
                return Ok(());
            }
        }
    }

    /// After a member or element: consumes either `,` (returns true, another
    /// item must follow) or `close` (returns false).
    fn parse_separator(&mut self, close: char) -> Result<bool, ParserError> {
        self.scanner.skip_whitespace();
        let comma_position = self.scanner.position();
        match self.scanner.peek() {
            Some(',') => {
                self.scanner.advance();
                self.scanner.skip_whitespace();
                if self.scanner.peek() == Some(close) {
                    return Err(ParserError::TrailingComma {
                        src: self.named_source(),
                        span: (comma_position, 1).into(),
                    });
                }
                Ok(true)
            }
            Some(c) if c == close => {
                self.scanner.advance();
                Ok(false)
            }
            None => self.err_eof(&format!("',' or '{close}'")),
            Some(_) => self.err_unexpected(&format!("',' or '{close}'")),
        }
    }

    /// String ::= '"' { Char | Escape } '"'
    fn parse_string(&mut self) -> Result<String, ParserError> {
        let start = self.scanner.position();
        self.scanner.advance();
        self.scanner.read_string().map_err(|fault| match fault {
            StringFault::Unterminated => ParserError::UnterminatedString {
                src: self.named_source(),
                span: (start, 1).into(),
            },
            StringFault::InvalidEscape(at) => ParserError::InvalidEscape {
                src: self.named_source(),
                span: (at, 2).into(),
            },
        })
    }

    /// A number with a fraction or an exponent is a Float, anything else an
    /// Int. Out of range integers and non-finite floats are rejected.
    fn parse_number(&mut self) -> Result<Node, ParserError> {
        let start = self.scanner.position();
        let text = self.scanner.read_number_text();
        let is_float = text.contains(['.', 'e', 'E']);
        let parsed = if is_float {
            text.parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Node::Float)
        } else {
            text.parse::<i64>().ok().map(Node::Int)
        };
        parsed.ok_or_else(|| ParserError::InvalidNumber {
            src: self.named_source(),
            span: (start, text.len()).into(),
            text: text.to_string(),
        })
    }

    /// Literal ::= "true" | "false" | "null"
    fn parse_literal(&mut self) -> Result<Node, ParserError> {
        let start = self.scanner.position();
        let word = self.scanner.read_word();
        match word {
            "true" => Ok(Node::Bool(true)),
            "false" => Ok(Node::Bool(false)),
            "null" => Ok(Node::Null),
            _ => Err(ParserError::UnexpectedToken {
                src: self.named_source(),
                span: (start, word.len()).into(),
                expected: "'true', 'false' or 'null'".to_string(),
            }),
        }
    }

    fn check_depth(&self, depth: usize) -> Result<(), ParserError> {
        if depth > self.options.max_depth {
            return Err(ParserError::NestingTooDeep {
                src: self.named_source(),
                span: (self.scanner.position(), 1).into(),
                limit: self.options.max_depth,
            });
        }
        Ok(())
    }

    // === Error Helpers ===

    fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(
            self.options.source_name.clone(),
            self.source_text.to_string(),
        )
    }

    fn err_unexpected<T>(&mut self, expected: &str) -> Result<T, ParserError> {
        let start = self.scanner.position();
        let len = self.scanner.peek().map_or(0, char::len_utf8);
        Err(ParserError::UnexpectedToken {
            src: self.named_source(),
            span: (start, len).into(),
            expected: expected.to_string(),
        })
    }

    fn err_eof<T>(&self, expected: &str) -> Result<T, ParserError> {
        Err(ParserError::UnexpectedEof {
            src: self.named_source(),
            span: (self.source_text.len(), 0).into(),
            expected: expected.to_string(),
        })
    }
}
