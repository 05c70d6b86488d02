// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pistonite

use std::io::Write;
use std::path::PathBuf;

use cu::pre::*;

/// Print the tokens of a source file, one per line
#[derive(clap::Parser)]
struct Cli {
    /// Source file to tokenize
    file: PathBuf,

    /// Only print the number of tokens
    #[clap(short, long)]
    count: bool,

    #[clap(flatten)]
    flags: cu::cli::Flags,
}

#[cu::cli(flags = "flags")]
fn main(cli: Cli) -> cu::Result<()> {
    let file = cli.file.display();
    let content = cu::check!(
        cu::fs::read_string(&cli.file),
        "failed to read source file '{file}'"
    )?;
    // positions in errors are counted from the start of the file
    let tokens = match lex::tokenize(&content) {
        Ok(tokens) => tokens,
        Err(e) => cu::bail!("failed to tokenize '{file}': {e}"),
    };
    cu::debug!("{} tokens in {file}", tokens.len());

    if cli.count {
        println!("{}", tokens.len());
        return Ok(());
    }

    let mut out = std::io::stdout().lock();
    for token in &tokens {
        cu::check!(writeln!(out, "{token}"), "failed to write to stdout")?;
    }
    Ok(())
}
