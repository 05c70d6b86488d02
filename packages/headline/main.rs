// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pistonite

use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = std::env::args_os().skip(1);
    let (Some(path), None) = (args.next(), args.next()) else {
        println!("Wrong number of args, must be 2");
        return ExitCode::FAILURE;
    };
    let path = PathBuf::from(path);

    if let Err(e) = headline::run(&path, std::io::stdout().lock()) {
        eprintln!("error: {e:?}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
