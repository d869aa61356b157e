use std::iter::Peekable;
use std::slice::Iter;

use anyhow::{anyhow, bail, Result};

use super::token_handlers::{parse_quote, parse_word};
use super::tokenizer::{tokenize, Delim, Token};
use crate::model::{Mapping, Value, ValueSet};

type Tokens<'a> = Peekable<Iter<'a, Token>>;

/// Turn text into a value
pub fn parse_value(s: &str) -> Result<Value> {
    let tokens = tokenize(s)?;
    let mut token_iter = tokens.iter().peekable();
    let value = build_value(&mut token_iter)?;

    // ensure tokens were exhausted
    if let Some(token) = token_iter.next() {
        bail!(
            "Value is complete, but tokens remain ({token:#?}). \
             Unmatched closing bracket?"
        )
    }

    Ok(value)
}

/// Build one value from the token stream.
///
/// WARNING: recurses once per nesting level of the text being read.
fn build_value(tokens: &mut Tokens) -> Result<Value> {
    let token = tokens.next().ok_or(anyhow!(
        "Token stream ended before value was complete"
    ))?;

    match token {
        Token::Open(Delim::Bracket) => build_list(tokens),
        Token::Open(Delim::Paren) => build_tuple(tokens),
        Token::Open(Delim::Brace) => build_braced(tokens),
        Token::Dash => build_value(tokens).and_then(try_negate),
        Token::Word(word) if word == "set" => {
            // `set()` is the only way to write an empty set
            match (tokens.next(), tokens.next()) {
                (Some(Token::Open(Delim::Paren)), Some(Token::Close(Delim::Paren))) => {
                    Ok(ValueSet::new().into())
                },
                _ => bail!("Expected `set()`"),
            }
        },
        Token::Word(word) => parse_word(word),
        Token::StringLit(quote) => parse_quote(quote),
        token => bail!("Unexpected token {token:#?}"),
    }
}

/// `[a, b, ...]`
fn build_list(tokens: &mut Tokens) -> Result<Value> {
    let mut items = Vec::new();
    if !close_if_next(tokens, Delim::Bracket) {
        loop {
            items.push(build_value(tokens)?);
            if !next_item(tokens, Delim::Bracket)? {
                break;
            }
        }
    }
    Ok(Value::list(items))
}

/// `()`, `(a,)`, `(a, b, ...)`; a lone `(a)` is just `a`
fn build_tuple(tokens: &mut Tokens) -> Result<Value> {
    let mut items = Vec::new();
    let mut saw_comma = false;
    if !close_if_next(tokens, Delim::Paren) {
        loop {
            items.push(build_value(tokens)?);
            saw_comma |= matches!(tokens.peek(), Some(Token::Comma));
            if !next_item(tokens, Delim::Paren)? {
                break;
            }
        }
    }

    if items.len() == 1 && !saw_comma {
        return Ok(items.swap_remove(0));
    }
    Ok(Value::tuple(items))
}

/// `{}` is an empty mapping; otherwise the first item decides between
/// a mapping (`{k: v}`) and a set (`{a, b}`)
fn build_braced(tokens: &mut Tokens) -> Result<Value> {
    if close_if_next(tokens, Delim::Brace) {
        return Ok(Mapping::new().into());
    }

    let first = build_value(tokens)?;
    if matches!(tokens.peek(), Some(Token::Colon)) {
        build_mapping(first, tokens)
    } else {
        build_set(first, tokens)
    }
}

fn build_mapping(first_key: Value, tokens: &mut Tokens) -> Result<Value> {
    let mut mapping = Mapping::new();
    let mut key = first_key;
    loop {
        match tokens.next() {
            Some(Token::Colon) => {},
            other => bail!("Expected ':' after mapping key, got {other:#?}"),
        }
        let value = build_value(tokens)?;
        mapping.insert(key, value)?;

        if !next_item(tokens, Delim::Brace)? {
            break;
        }
        key = build_value(tokens)?;
    }
    Ok(mapping.into())
}

fn build_set(first: Value, tokens: &mut Tokens) -> Result<Value> {
    let mut set = ValueSet::new();
    let mut item = first;
    loop {
        set.insert(item)?;
        if !next_item(tokens, Delim::Brace)? {
            break;
        }
        item = build_value(tokens)?;
    }
    Ok(set.into())
}

/***********\
|* Helpers *|
\***********/

/// Consume the closing delimiter if it comes next
fn close_if_next(tokens: &mut Tokens, close: Delim) -> bool {
    tokens
        .next_if(|token| **token == Token::Close(close))
        .is_some()
}

/// Called after an item: consumes a `,` or the closing delimiter.
/// Returns whether another item follows. Trailing commas are fine.
fn next_item(tokens: &mut Tokens, close: Delim) -> Result<bool> {
    match tokens.next() {
        Some(Token::Comma) => Ok(!close_if_next(tokens, close)),
        Some(Token::Close(delim)) if *delim == close => Ok(false),
        Some(other) => bail!("Expected ',' or {close}, got {other:#?}"),
        None => bail!("Token stream ended before {close}"),
    }
}

fn try_negate(value: Value) -> Result<Value> {
    match value {
        Value::Int(n) => Ok(Value::Int(-n)),
        Value::Float(f) => Ok(Value::Float(-f)),
        other => Err(anyhow!("Can't negate {}", other.category())),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn do_literal_test(input: &str, expected: Value) {
        assert_eq!(parse_value(input).unwrap(), expected);
    }

    #[test]
    fn test_parse_ints() {
        do_literal_test("0", Value::Int(0));
        do_literal_test("10", Value::Int(10));
        do_literal_test("00103", Value::Int(103));
    }

    #[test]
    fn test_parse_floats() {
        do_literal_test("0.", Value::Float(0.));
        do_literal_test("82.7110", Value::Float(82.7110));
        do_literal_test("12e3", Value::Float(12000.));
    }

    #[test]
    fn test_parse_negative_numbers() {
        do_literal_test("-1", Value::Int(-1));
        do_literal_test("- 0010", Value::Int(-10));
        do_literal_test("- 82.7110", Value::Float(-82.7110));
        assert!(parse_value("-'a'").is_err());
    }

    #[test]
    fn test_parse_sequences_and_tuples() {
        do_literal_test(
            "[1, 'a',]",
            Value::list(vec![Value::Int(1), "a".into()]),
        );
        do_literal_test("()", Value::tuple(vec![]));
        do_literal_test("(1,)", Value::tuple(vec![Value::Int(1)]));
        do_literal_test("(1)", Value::Int(1));
        do_literal_test(
            "(nil, true)",
            Value::tuple(vec![Value::Nil, Value::Bool(true)]),
        );
    }

    #[test]
    fn test_parse_braces() {
        do_literal_test("{}", Mapping::new().into());
        do_literal_test("set()", ValueSet::new().into());
        do_literal_test(
            "{2, 2, 3}",
            ValueSet::try_from(vec![Value::Int(2), Value::Int(3)])
                .unwrap()
                .into(),
        );
        do_literal_test(
            "{'a': 1, 'b': [2]}",
            Mapping::try_from(vec![
                ("a".into(), Value::Int(1)),
                ("b".into(), Value::list(vec![Value::Int(2)])),
            ])
            .unwrap()
            .into(),
        );
    }

    #[test]
    fn test_display_reads_back() {
        let text = "{\"a\": [1, \"b\", {2}], \"b\": (1, 2), c'k': set()}";
        let value = parse_value(text).unwrap();
        assert_eq!(value.to_string(), text);
        assert_eq!(parse_value(&value.to_string()).unwrap(), value);
    }

    #[test]
    fn test_escapes_read_back() {
        let values = vec![
            Value::Str("hi \"you\"".to_string()),
            Value::Str("it's a\\b\t".to_string()),
            Value::Char('\n'),
            Value::Char('\\'),
            Value::Char('\''),
            Value::Char('"'),
            Value::Bytes(b"q\"\xff".to_vec()),
            Value::Float(f64::INFINITY),
            Value::Float(f64::NEG_INFINITY),
        ];
        for value in values {
            assert_eq!(parse_value(&value.to_string()).unwrap(), value);
        }

        do_literal_test("'say \"hi\"'", "say \"hi\"".into());
        do_literal_test("\"it's\"", "it's".into());
        do_literal_test("c\"'\"", Value::Char('\''));

        let nan = parse_value(&Value::Float(f64::NAN).to_string()).unwrap();
        assert!(matches!(nan, Value::Float(f) if f.is_nan()));
    }

    #[test]
    fn test_errors() {
        assert!(parse_value("").is_err());
        assert!(parse_value("[1, 2").is_err());
        assert!(parse_value("[1 2]").is_err());
        assert!(parse_value("[1])").is_err());
        assert!(parse_value("(1, 2]").is_err());
        assert!(parse_value("{'a': 1, 'b'}").is_err());
        assert!(parse_value("{[1]: 2}").is_err());
        assert!(parse_value("{[1], 2}").is_err());
        assert!(parse_value("set(1)").is_err());
    }
}
