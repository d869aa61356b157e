//! Reads values written in literal notation, e.g.
//! `{"a": [1, "b", {2}], "b": (1, 2)}`.
mod token_handlers;
mod tokenizer;
mod value_builder;

pub use value_builder::parse_value;
