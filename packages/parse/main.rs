// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pistonite

use std::path::PathBuf;

use cu::pre::*;

/// Parse a class source file and print it back
#[derive(clap::Parser)]
struct Cli {
    /// Source file to parse
    file: PathBuf,

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
    let class = match parse::parse(&content) {
        Ok(class) => class,
        Err(e) => cu::bail!("failed to parse '{file}': {e}"),
    };
    cu::debug!(
        "class {} with {} functions in {file}",
        class.name,
        class.body.functions.len()
    );
    println!("{class}");
    Ok(())
}
