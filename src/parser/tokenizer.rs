use std::fmt::{Display, Formatter};

use anyhow::{bail, Result};

use Token::*;

/*************\
|* Tokenizer *|
\*************/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delim {
    Paren,
    Bracket,
    Brace,
}

impl Display for Delim {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Delim::Paren => write!(f, "')'"),
            Delim::Bracket => write!(f, "']'"),
            Delim::Brace => write!(f, "'}}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub(super) sigil: String,
    pub(super) mark: char,
    pub(super) content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Open(Delim),
    Close(Delim),
    Comma,
    Colon,
    Dash,
    Word(String),
    StringLit(Quote),
}

pub fn tokenize(s: &str) -> Result<Vec<Token>> {
    let mut tokens: Vec<Token> = vec![];
    let mut current_word: String = "".to_string();
    let mut current_quote: Option<Quote> = None;
    let mut is_escaped: bool = false;

    for char in s.chars() {
        /**********************************\
        |* Quoted string literal handling *|
        \**********************************/
        if let Some(mut quote) = current_quote.take() {
            if is_escaped {
                // escapes are kept as written, litrs resolves them later
                quote.content.push('\\');
                quote.content.push(char);
                is_escaped = false;
            } else if char == quote.mark {
                tokens.push(StringLit(quote));
                continue;
            } else if char == '\\' {
                is_escaped = true;
            } else {
                quote.content.push(char);
            }
            current_quote = Some(quote);
        }
        /***************\
        |* Quote start *|
        \***************/
        else if char == '\'' || char == '"' {
            current_quote = Some(Quote {
                sigil: current_word.clone(),
                mark: char,
                content: String::new(),
            });
            current_word.clear();
        }
        /**************************************\
        |* Everything besides string literals *|
        \**************************************/
        else if let Some(token) = punctuation(char) {
            push_word(&mut tokens, &mut current_word);
            tokens.push(token);
        } else if char.is_whitespace() {
            push_word(&mut tokens, &mut current_word);
        }
        // leading dashes become the "dash" token
        else if current_word.is_empty() && char == '-' {
            tokens.push(Dash)

        // continue with current word
        } else {
            current_word.push(char);
        }
    }

    if let Some(quote) = current_quote {
        bail!("Unterminated string literal: {quote:#?}")
    }
    push_word(&mut tokens, &mut current_word);

    tracing::trace!(count = tokens.len(), "tokenized literal");
    Ok(tokens)
}

fn punctuation(char: char) -> Option<Token> {
    match char {
        '(' => Some(Open(Delim::Paren)),
        ')' => Some(Close(Delim::Paren)),
        '[' => Some(Open(Delim::Bracket)),
        ']' => Some(Close(Delim::Bracket)),
        '{' => Some(Open(Delim::Brace)),
        '}' => Some(Close(Delim::Brace)),
        ',' => Some(Comma),
        ':' => Some(Colon),
        _ => None,
    }
}

#[inline]
fn push_word(tokens: &mut Vec<Token>, current_word: &mut String) {
    if !current_word.is_empty() {
        tokens.push(Word(current_word.clone()));
        current_word.clear();
    }
}
