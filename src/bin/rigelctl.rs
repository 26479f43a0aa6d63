// SPDX-License-Identifier: MIT OR Apache-2.0

//! `rigelctl`: manage rigel schemas and configuration values.
//!
//! ```text
//! rigelctl add-schema app 1 '[{"name":"port","type":"int"}]'
//! rigelctl set app 1 port 8080
//! rigelctl show app 1
//! ```

use clap::Parser;
use rigel::cli::{init_tracing, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rigelctl: {}", e);
            ExitCode::FAILURE
        }
    }
}
