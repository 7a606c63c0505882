// Copyright 2025 Mako Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Mako dashboard CLI entry point.

fn main() {
    if let Err(e) = mako_cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
