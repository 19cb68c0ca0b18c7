use bigdecimal::BigDecimal;
use snafu::OptionExt;

use crate::scan;

/// Classification of the lexical unit under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    IntLiteral,
    FloatLiteral,
    StringLiteral,
    Identifier,
    True,
    False,
    Null,
    Comma,
    Colon,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
enum Token<'a> {
    Int(&'a str),
    Float(&'a str),
    Str(String),
    Ident(&'a str),
    True,
    False,
    Null,
    Comma,
    Colon,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Eof,
}

impl Token<'_> {
    fn kind(&self) -> TokenKind {
        match self {
            Token::Int(_) => TokenKind::IntLiteral,
            Token::Float(_) => TokenKind::FloatLiteral,
            Token::Str(_) => TokenKind::StringLiteral,
            Token::Ident(_) => TokenKind::Identifier,
            Token::True => TokenKind::True,
            Token::False => TokenKind::False,
            Token::Null => TokenKind::Null,
            Token::Comma => TokenKind::Comma,
            Token::Colon => TokenKind::Colon,
            Token::LeftBrace => TokenKind::LeftBrace,
            Token::RightBrace => TokenKind::RightBrace,
            Token::LeftBracket => TokenKind::LeftBracket,
            Token::RightBracket => TokenKind::RightBracket,
            Token::Eof => TokenKind::Eof,
        }
    }
}

/// A pull tokenizer over in-memory JSON text.
///
/// The lexer always holds one fully scanned token. Numeric tokens keep their
/// raw lexeme; the decoded integer or decimal reading is produced on demand
/// so callers that need the original digit sequence can still get it.
#[derive(Debug)]
pub struct Lexer<'a> {
    input: &'a str,
    rest: &'a str,
    token: Token<'a>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer and scans the first token.
    pub fn new(input: &'a str) -> Result<Self> {
        let mut lexer = Self {
            input,
            rest: input,
            token: Token::Eof,
        };
        lexer.advance()?;
        Ok(lexer)
    }

    /// Kind of the token under the cursor.
    pub fn token(&self) -> TokenKind {
        self.token.kind()
    }

    /// Byte offset of the unscanned remainder, for diagnostics.
    pub fn offset(&self) -> usize {
        self.input.len() - self.rest.len()
    }

    /// The raw lexeme of the current numeric token, original digit sequence
    /// and sign included. Empty for non-numeric tokens.
    pub fn number_text(&self) -> &'a str {
        match self.token {
            Token::Int(text) | Token::Float(text) => text,
            _ => "",
        }
    }

    /// Decodes the current numeric token as a signed 64-bit integer.
    pub fn long_value(&self) -> Result<i64> {
        let text = self.number_text();
        let value = text
            .parse::<i64>()
            .ok()
            .context(error::IntegerValueSnafu { text })?;
        Ok(value)
    }

    /// Decodes the current numeric token as an exact decimal.
    pub fn decimal_value(&self) -> Result<BigDecimal> {
        let text = self.number_text();
        let value = text
            .parse::<BigDecimal>()
            .ok()
            .context(error::DecimalValueSnafu { text })?;
        Ok(value)
    }

    /// Text of the current identifier token. Empty for other tokens.
    pub fn ident_text(&self) -> &'a str {
        match self.token {
            Token::Ident(text) => text,
            _ => "",
        }
    }

    /// Decoded content of the current string token. Empty for other tokens.
    pub fn string_value(&self) -> &str {
        match &self.token {
            Token::Str(data) => data,
            _ => "",
        }
    }

    /// Moves the cursor past the current token and scans the next one.
    pub fn advance(&mut self) -> Result<()> {
        self.token = self.scan()?;
        Ok(())
    }

    /// Like [`Lexer::advance`], with a hint naming the token expected next.
    ///
    /// When the hint is a single-character token and the next byte matches,
    /// the token is constructed without going through the scanner dispatch.
    /// The hint is never required for correctness; a mismatch falls back to a
    /// full scan.
    pub fn advance_expecting(&mut self, hint: TokenKind) -> Result<()> {
        self.skip_whitespace();

        let matched = match (hint, self.rest.as_bytes().first()) {
            (TokenKind::Comma, Some(b',')) => Some(Token::Comma),
            (TokenKind::Colon, Some(b':')) => Some(Token::Colon),
            (TokenKind::LeftBrace, Some(b'{')) => Some(Token::LeftBrace),
            (TokenKind::RightBrace, Some(b'}')) => Some(Token::RightBrace),
            (TokenKind::LeftBracket, Some(b'[')) => Some(Token::LeftBracket),
            (TokenKind::RightBracket, Some(b']')) => Some(Token::RightBracket),
            _ => None,
        };

        match matched {
            Some(token) => {
                self.rest = &self.rest[1..];
                self.token = token;
                Ok(())
            }
            None => self.advance(),
        }
    }

    fn skip_whitespace(&mut self) {
        if let Ok((rest, ())) = scan::whitespace(self.rest) {
            self.rest = rest;
        }
    }

    fn scan(&mut self) -> Result<Token<'a>> {
        self.skip_whitespace();

        let Some(&byte) = self.rest.as_bytes().first() else {
            return Ok(Token::Eof);
        };

        let token = match byte {
            b'{' => self.take_single(Token::LeftBrace),
            b'}' => self.take_single(Token::RightBrace),
            b'[' => self.take_single(Token::LeftBracket),
            b']' => self.take_single(Token::RightBracket),
            b',' => self.take_single(Token::Comma),
            b':' => self.take_single(Token::Colon),
            b'"' => {
                let offset = self.offset();
                let (rest, data) = scan::string(self.rest)
                    .ok()
                    .context(error::MalformedStringSnafu { offset })?;
                self.rest = rest;
                Token::Str(data)
            }
            b'-' | b'0'..=b'9' => {
                let offset = self.offset();
                let (rest, lexeme) = scan::number(self.rest)
                    .ok()
                    .context(error::MalformedNumberSnafu { offset })?;
                self.rest = rest;
                if lexeme.float {
                    Token::Float(lexeme.text)
                } else {
                    Token::Int(lexeme.text)
                }
            }
            _ if byte.is_ascii_alphabetic() || byte == b'_' => {
                let (rest, text) = scan::ident(self.rest)
                    .ok()
                    .context(error::MalformedIdentSnafu {
                        offset: self.offset(),
                    })?;
                self.rest = rest;
                match text {
                    "true" => Token::True,
                    "false" => Token::False,
                    "null" => Token::Null,
                    _ => Token::Ident(text),
                }
            }
            _ => {
                return error::UnexpectedCharacterSnafu {
                    found: self.rest.chars().next().unwrap_or('\u{FFFD}'),
                    offset: self.offset(),
                }
                .fail()
                .map_err(Into::into);
            }
        };

        Ok(token)
    }

    fn take_single(&mut self, token: Token<'a>) -> Token<'a> {
        self.rest = &self.rest[1..];
        token
    }
}

#[derive(Debug, snafu::Snafu)]
pub struct Error(error::Error);
pub type Result<T> = std::result::Result<T, Error>;

mod error {
    use snafu::Snafu;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(super)))]
    pub(super) enum Error {
        #[snafu(display("unexpected character '{found}' at offset {offset}"))]
        UnexpectedCharacter { found: char, offset: usize },

        #[snafu(display("malformed string literal at offset {offset}"))]
        MalformedString { offset: usize },

        #[snafu(display("malformed number literal at offset {offset}"))]
        MalformedNumber { offset: usize },

        #[snafu(display("malformed identifier at offset {offset}"))]
        MalformedIdent { offset: usize },

        #[snafu(display("number literal '{text}' does not fit in a 64-bit integer"))]
        IntegerValue { text: String },

        #[snafu(display("number literal '{text}' is not a valid decimal"))]
        DecimalValue { text: String },
    }
}
