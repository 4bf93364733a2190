mod commands;
mod terminal;

use commands::{CommandLine, run};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    print::banner();
    let cfg = commands.to_config();

    print::header("getting ready for recon");
    run::run(cfg).await
}
