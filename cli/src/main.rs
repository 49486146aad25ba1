mod commands;
mod terminal;

use commands::{CommandLine, browse};
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CommandLine::parse_args();

    logging::init();

    browse::browse(args.into_config()).await
}
