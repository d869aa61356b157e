use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use litrs::Literal;
use regex::Regex;

use super::tokenizer::Quote;
use crate::model::Value;

/// Parse a bare word: a number, a boolean, `nil`/`None`, or `inf`/`NaN`
pub fn parse_word(s: &str) -> Result<Value> {
    parse_literal(s).or_else(|_| parse_name(s))
}

/// Try to parse a word as a literal, more or less the same way as rust does
fn parse_literal(s: &str) -> Result<Value> {
    Literal::parse(s)
        .map_err(anyhow::Error::from)
        .and_then(check_suffix)
        .and_then(|r| {
            match r {
                Literal::Bool(_) => Ok(Value::Bool(s.parse()?)),

                Literal::Integer(_) => Ok(Value::Int(s.parse()?)),

                Literal::Float(lit) => {
                    Ok(Value::Float(lit.number_part().parse()?))
                },

                lit => Err(anyhow!("'{lit}' can't be written as a bare word")),
            }
        })
}

/// Must only be called after ensuring that the word is not a literal.
fn parse_name(s: &str) -> Result<Value> {
    if !NAME_RE.is_match(s) {
        Err(anyhow!("'{s}' is not a valid literal"))
    } else if s == "nil" || s == "None" {
        Ok(Value::Nil)
    } else if s == "inf" {
        Ok(Value::Float(f64::INFINITY))
    } else if s == "NaN" {
        Ok(Value::Float(f64::NAN))
    } else {
        Err(anyhow!("Unknown name '{s}'"))
    }
}

/// Parse a quoted string. The current treatment should be nearly identical to
/// rust, except that:
/// A) single-quotes are treated as equivalent to double-quotes, and
/// B) characters are denoted by the sigil c
pub fn parse_quote(quote: &Quote) -> Result<Value> {
    if quote.sigil == "c" {
        let lits = format!("'{}'", requote(&quote.content, '\''));
        match Literal::parse(lits)? {
            Literal::Char(cl) => Ok(Value::Char(cl.value())),
            _ => {
                Err(anyhow!(
                    "Quote had sigil `c` but is not a single character: {quote:#?}"
                ))
            },
        }
    } else {
        let lits =
            format!("{}\"{}\"", quote.sigil, requote(&quote.content, '"'));
        Literal::parse(lits)
            .map_err(anyhow::Error::from)
            .and_then(|r| {
                match r {
                    Literal::String(sl) => {
                        Ok(Value::Str(sl.into_value().to_string()))
                    },
                    Literal::ByteString(bl) => {
                        Ok(Value::Bytes(bl.into_value().to_vec()))
                    },
                    _ => Err(anyhow!("Failed to parse quote: {quote:#?}")),
                }
            })
    }
}

/// Escape any bare `mark` in quote content, so the content can be wrapped
/// in `mark` for litrs. Content quoted with the other mark may hold them.
fn requote(content: &str, mark: char) -> String {
    let mut out = String::with_capacity(content.len());
    let mut is_escaped = false;
    for char in content.chars() {
        if char == mark && !is_escaped {
            out.push('\\');
        }
        is_escaped = char == '\\' && !is_escaped;
        out.push(char);
    }
    out
}

/***********\
|* Helpers *|
\***********/
lazy_static! {
    static ref NAME_RE: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap();
}

/// Ensure literal doesn't have a suffix
/// E.g., "15" is ok, "15u32" is not, because u32 is a rust thing)
fn check_suffix(lit: Literal<&str>) -> Result<Literal<&str>> {
    if lit.suffix() == "" {
        Ok(lit)
    } else {
        Err(anyhow!(
            "Forbidden suffix '{}' on literal '{}'",
            lit.suffix(),
            lit
        ))
    }
}
