//! unified-env: inspect how env, argv and `.env` sources merge into a configuration

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
