//! Example: Parse SLua source and print its syntax tree
//!
//! Usage: cargo run --example parse_tree [script.lua]
//!
//! Without an argument the built-in demo line is parsed.

use anyhow::Context;
use slua::{Parser, Scanner};
use std::env;
use std::fs;

const DEMO_SOURCE: &str = "local さよなら = 'Hello, 世界'";

fn main() -> anyhow::Result<()> {
    let source = match env::args().nth(1) {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("Error reading file '{}'", path))?,
        None => DEMO_SOURCE.to_string(),
    };

    println!("=== SLua Parser Demo ===\n");
    println!("Source code:\n{}\n", source);

    let tree = Parser::new(Scanner::from_source(&source))
        .parse()
        .context("Parse failed")?;

    println!("Tree:\n{}\n", tree);
    println!("JSON:\n{}", serde_json::to_string_pretty(&tree)?);
    Ok(())
}
