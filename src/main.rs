//! # signer CLI
//!
//! Command-line interface for the signer pipeline.
//!
//! ## Usage
//! ```bash
//! signer run 0 1 1 2 3 5 8
//! signer run --input values.txt --output json
//! ```

mod cli;

use signer_pipeline::Result;

fn main() -> Result<()> {
    cli::run()
}
