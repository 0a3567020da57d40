//! Example: Print the token stream of SLua source
//!
//! Usage: cargo run --example dump_tokens [script.lua]

use anyhow::Context;
use slua::Scanner;
use std::env;
use std::fs;

fn main() -> anyhow::Result<()> {
    let source = match env::args().nth(1) {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("Error reading file '{}'", path))?,
        None => "local x = -1 + 2 * (y .. 'z') -- tail".to_string(),
    };

    println!("=== SLua Lexer Demo ===\n");

    let mut scanner = Scanner::from_source(&source);
    loop {
        let token = scanner.scan().context("Lexer error")?;
        println!(
            "  {:>3}:{:<3} {:<10} {}",
            token.line, token.column, token.category, token
        );
        if token.is_eof() {
            break;
        }
    }
    Ok(())
}
