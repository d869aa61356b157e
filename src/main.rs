use std::sync::Once;

use anyhow::Result;
use mapping_summary::{
    describe_shape, parse_value, shallow_size, summarize_with, SummaryOptions,
    Value,
};
use rustyline::error::ReadlineError;

static TRACING_INIT: Once = Once::new();

fn main() -> Result<()> {
    init_tracing();
    let mut options = SummaryOptions::default();

    // start reading lines
    let mut rl = rl_editor()?;
    loop {
        // get user input
        let input = match rl.readline(">> ") {
            Ok(input) => input,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if input == "exit" || input == "quit" {
            break;
        }

        // `:depth N` changes how far shapes descend
        if let Some(arg) = input.strip_prefix(":depth") {
            match arg.trim().parse() {
                Ok(depth) => {
                    options.max_depth = depth;
                    println!("max depth: {depth}");
                },
                Err(err) => println!("Bad depth '{}': {err}", arg.trim()),
            }
            continue;
        }

        // Read
        let value = match parse_value(input) {
            Ok(value) => value,
            Err(err) => {
                println!("Parse error: {err}");
                continue;
            },
        };

        // Print
        println!("{}", describe(&value, &options));
    }

    Ok(())
}

/// Mappings get the full summary table, anything else just its shape
fn describe(value: &Value, options: &SummaryOptions) -> String {
    match summarize_with(value, options) {
        Ok(snapshot) => snapshot.render(),
        Err(_) => {
            format!(
                "{}  ({} bytes, shallow)",
                describe_shape(value, options.max_depth),
                shallow_size(value)
            )
        },
    }
}

/// Enable with `RUST_LOG=mapping_summary=debug`
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn rl_editor() -> Result<rustyline::DefaultEditor> {
    let cfg = rustyline::Config::builder()
        .tab_stop(2)
        .auto_add_history(true)
        .bracketed_paste(true)
        .build();

    Ok(rustyline::DefaultEditor::with_config(cfg)?)
}
