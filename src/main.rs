//! logemit - レベル付きログ出力ツール

mod cli;

use anyhow::Result;

fn main() -> Result<()> {
    cli::run()
}
