//! # seq-signer CLI
//!
//! Command-line interface for the sequence signer.
//!
//! ## Usage
//! ```bash
//! seq-signer sign --count 100
//! seq-signer sign 3 1 4 --output json
//! ```

mod cli;

use sequence_signer::Result;

fn main() -> Result<()> {
    cli::run()
}
