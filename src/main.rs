use clap::Parser;

use sdk_resolver::cli::{self, Cli};
use sdk_resolver::logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, source) = cli::load_config(cli.config.as_deref())?;
    let _guard = logging::init(&config.general)?;
    source.log();

    let mut stdout = std::io::stdout().lock();

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(cli::run(cli, config, &mut stdout))
}
