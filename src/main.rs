use anyhow::Result;
use clap::Parser;
use vettura::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
