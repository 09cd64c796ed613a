/// Placeholder stored in place of every `\uXXXX` escape. Unicode escapes are
/// consumed but not decoded.
pub const UNICODE_PLACEHOLDER: char = '?';

/// Why the scanner gave up on a string literal.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum StringFault {
    /// The input ended before the closing quote.
    Unterminated,
    /// An unknown escape, or a `\u` not followed by four hex digits.
    /// Holds the byte offset of the backslash.
    InvalidEscape(usize),
}

/// A character cursor over the raw text. The parser pulls from it on demand;
/// there is no separate token stream.
pub struct Scanner<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    position: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().peekable(),
            position: 0,
        }
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    pub fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    pub fn advance(&mut self) -> Option<char> {
        let char = self.chars.next();
        if let Some(c) = char {
            self.position += c.len_utf8();
        }
        char
    }

    /// Consumes `expected` if it is the next character.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skips spaces, tabs, carriage returns and line feeds. Nothing else
    /// counts as whitespace between tokens.
    pub fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\r' | '\n') = self.peek() {
            self.advance();
        }
    }

    /// Reads a string literal body. The opening quote must already be
    /// consumed; the closing quote is consumed here.
    pub fn read_string(&mut self) -> Result<String, StringFault> {
        let mut value = String::new();
        loop {
            let escape_start = self.position;
            let c = self.advance().ok_or(StringFault::Unterminated)?;
            match c {
                '"' => return Ok(value),
                '\\' => {
                    let escaped = self.advance().ok_or(StringFault::Unterminated)?;
                    match escaped {
                        '"' => value.push('"'),
                        '\\' => value.push('\\'),
                        '/' => value.push('/'),
                        'b' => value.push('\u{8}'),
                        'f' => value.push('\u{c}'),
                        'n' => value.push('\n'),
                        'r' => value.push('\r'),
                        't' => value.push('\t'),
                        'u' => {
                            for _ in 0..4 {
                                match self.advance() {
                                    Some(h) if h.is_ascii_hexdigit() => {}
                                    Some(_) => return Err(StringFault::InvalidEscape(escape_start)),
                                    None => return Err(StringFault::Unterminated),
                                }
                            }
                            value.push(UNICODE_PLACEHOLDER);
                        }
                        _ => return Err(StringFault::InvalidEscape(escape_start)),
                    }
                }
                other => value.push(other),
            }
        }
    }

    /// Reads the longest run of characters that can appear in a number
    /// literal and returns it unparsed.
    pub fn read_number_text(&mut self) -> &'a str {
        let start = self.position;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E') {
                self.advance();
            } else {
                break;
            }
        }
        &self.input[start..self.position]
    }

    /// Reads a run of ASCII letters, used for `true`, `false` and `null`.
    pub fn read_word(&mut self) -> &'a str {
        let start = self.position;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphabetic() {
                self.advance();
            } else {
                break;
            }
        }
        &self.input[start..self.position]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_of(input: &str) -> Result<String, StringFault> {
        let mut scanner = Scanner::new(input);
        assert!(scanner.eat('"'));
        scanner.read_string()
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(string_of(r#""hello world""#), Ok("hello world".to_string()));
        assert_eq!(string_of(r#""""#), Ok(String::new()));
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            string_of(r#""a\"b\\c\/d\be\ff\ng\rh\ti""#),
            Ok("a\"b\\c/d\u{8}e\u{c}f\ng\rh\ti".to_string())
        );
    }

    #[test]
    fn test_unicode_escape_becomes_placeholder() {
        assert_eq!(string_of(r#""caf\u00e9!""#), Ok("caf?!".to_string()));
    }

    #[test]
    fn test_bad_escapes() {
        assert_eq!(string_of(r#""\x""#), Err(StringFault::InvalidEscape(1)));
        assert_eq!(string_of(r#""\u12G4""#), Err(StringFault::InvalidEscape(1)));
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(string_of(r#""never closed"#), Err(StringFault::Unterminated));
        assert_eq!(string_of(r#""dangling\"#), Err(StringFault::Unterminated));
    }

    #[test]
    fn test_number_text_stops_at_delimiters() {
        let mut scanner = Scanner::new("-12.5e+3, 7");
        assert_eq!(scanner.read_number_text(), "-12.5e+3");
        assert_eq!(scanner.peek(), Some(','));
    }

    #[test]
    fn test_whitespace_is_only_space_tab_cr_lf() {
        let mut scanner = Scanner::new(" \t\r\n\u{a0}x");
        scanner.skip_whitespace();
        assert_eq!(scanner.peek(), Some('\u{a0}'));
        assert_eq!(scanner.position(), 4);
    }

    #[test]
    fn test_positions_are_byte_offsets() {
        let mut scanner = Scanner::new("é1");
        scanner.advance();
        assert_eq!(scanner.position(), 2);
        assert_eq!(scanner.read_number_text(), "1");
    }

    #[test]
    fn test_read_word() {
        let mut scanner = Scanner::new("true,");
        assert_eq!(scanner.read_word(), "true");
        assert!(scanner.eat(','));
        assert!(scanner.is_at_end());
    }
}
