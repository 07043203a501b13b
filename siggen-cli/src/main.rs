use self::args::{ToolArgs, ToolSubcommand};
use clap::Parser;
use color_eyre::eyre;

mod args;
mod observability;
mod process;
mod util;
mod verify;

async fn boot() -> eyre::Result<()> {
    let args = ToolArgs::parse();
    observability::initialise()?;

    match args.subcommand {
        ToolSubcommand::Process(args) => process::run(args).await,
        ToolSubcommand::Verify(args) => verify::run(args).await,
    }
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(boot())
}
