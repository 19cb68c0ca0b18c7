use smol_str::SmolStr;
use snafu::ResultExt;

use crate::{
    lexer::{Lexer, TokenKind},
    types::Value,
};

/// Parses the value at the lexer's current position into the generic model.
///
/// Consumes exactly one complete value (scalar, array or object) and leaves
/// the cursor on the token that follows it. Integer literals decode to
/// [`Value::Integer`], float literals to the exact [`Value::Decimal`];
/// nothing on this path goes through floating point.
///
/// Bare identifiers are rejected here: sentinels such as `NaN` only have a
/// meaning to a caller that knows the requested type.
pub fn parse_value(lexer: &mut Lexer) -> Result<Value> {
    let value = match lexer.token() {
        TokenKind::IntLiteral => {
            let value = lexer.long_value().context(error::LexSnafu)?;
            lexer
                .advance_expecting(TokenKind::Comma)
                .context(error::LexSnafu)?;
            Value::Integer(value)
        }
        TokenKind::FloatLiteral => {
            let value = lexer.decimal_value().context(error::LexSnafu)?;
            lexer
                .advance_expecting(TokenKind::Comma)
                .context(error::LexSnafu)?;
            Value::Decimal(value)
        }
        TokenKind::StringLiteral => {
            let value = lexer.string_value().to_owned();
            lexer
                .advance_expecting(TokenKind::Comma)
                .context(error::LexSnafu)?;
            Value::String(value)
        }
        TokenKind::True => {
            lexer.advance().context(error::LexSnafu)?;
            Value::Bool(true)
        }
        TokenKind::False => {
            lexer.advance().context(error::LexSnafu)?;
            Value::Bool(false)
        }
        TokenKind::Null => {
            lexer.advance().context(error::LexSnafu)?;
            Value::Null
        }
        TokenKind::LeftBracket => parse_array(lexer)?,
        TokenKind::LeftBrace => parse_object(lexer)?,
        kind => {
            return Err(error::Error::UnexpectedToken {
                kind,
                offset: lexer.offset(),
            }
            .into());
        }
    };

    Ok(value)
}

fn parse_array(lexer: &mut Lexer) -> Result<Value> {
    lexer.advance().context(error::LexSnafu)?;

    let mut items = Vec::new();
    if lexer.token() == TokenKind::RightBracket {
        lexer
            .advance_expecting(TokenKind::Comma)
            .context(error::LexSnafu)?;
        return Ok(Value::Array(items));
    }

    loop {
        items.push(parse_value(lexer)?);

        match lexer.token() {
            TokenKind::Comma => lexer.advance().context(error::LexSnafu)?,
            TokenKind::RightBracket => {
                lexer
                    .advance_expecting(TokenKind::Comma)
                    .context(error::LexSnafu)?;
                break;
            }
            kind => {
                return Err(error::Error::UnexpectedToken {
                    kind,
                    offset: lexer.offset(),
                }
                .into());
            }
        }
    }

    Ok(Value::Array(items))
}

fn parse_object(lexer: &mut Lexer) -> Result<Value> {
    lexer.advance().context(error::LexSnafu)?;

    let mut members = Vec::new();
    if lexer.token() == TokenKind::RightBrace {
        lexer
            .advance_expecting(TokenKind::Comma)
            .context(error::LexSnafu)?;
        return Ok(Value::Object(members));
    }

    loop {
        if lexer.token() != TokenKind::StringLiteral {
            return Err(error::Error::UnexpectedToken {
                kind: lexer.token(),
                offset: lexer.offset(),
            }
            .into());
        }
        let key = SmolStr::new(lexer.string_value());

        lexer
            .advance_expecting(TokenKind::Colon)
            .context(error::LexSnafu)?;
        if lexer.token() != TokenKind::Colon {
            return Err(error::Error::UnexpectedToken {
                kind: lexer.token(),
                offset: lexer.offset(),
            }
            .into());
        }
        lexer.advance().context(error::LexSnafu)?;

        members.push((key, parse_value(lexer)?));

        match lexer.token() {
            TokenKind::Comma => lexer.advance().context(error::LexSnafu)?,
            TokenKind::RightBrace => {
                lexer
                    .advance_expecting(TokenKind::Comma)
                    .context(error::LexSnafu)?;
                break;
            }
            kind => {
                return Err(error::Error::UnexpectedToken {
                    kind,
                    offset: lexer.offset(),
                }
                .into());
            }
        }
    }

    Ok(Value::Object(members))
}

#[derive(Debug, snafu::Snafu)]
pub struct Error(error::Error);
type Result<T> = std::result::Result<T, Error>;

mod error {
    use snafu::Snafu;

    use crate::lexer::TokenKind;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(super)))]
    pub(super) enum Error {
        #[snafu(display("Error while scanning tokens"))]
        Lex { source: crate::lexer::Error },

        #[snafu(display("unexpected {kind:?} token at offset {offset}"))]
        UnexpectedToken { kind: TokenKind, offset: usize },
    }
}
