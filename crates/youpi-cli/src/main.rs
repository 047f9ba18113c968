use std::fs::OpenOptions;

use anyhow::Result;
use clap::ArgMatches;
use log::LevelFilter;
use youpi_term::application::cli;
use youpi_term::application::cli::Invocation;
use youpi_term::Config;
use youpi_term::ConsoleOptions;

fn init_logging(matches: &ArgMatches) -> Result<()> {
    let log_level_filter = matches
        .get_one::<String>("log-level")
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Info);

    let mut builder = env_logger::Builder::new();
    builder.filter_level(log_level_filter);

    // The serial console may share the operator's terminal, keep logs out of it.
    let log_file = matches
        .get_one::<String>("log-file")
        .map(|s| s.as_str())
        .unwrap_or_default();
    if !log_file.is_empty() {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    return Ok(());
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = match cli::dispatch(cli::build().get_matches()) {
        Invocation::Run(matches) => matches,
        Invocation::Done => return Ok(()),
    };

    init_logging(&matches)?;

    std::panic::set_hook(Box::new(|panic_info| {
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    Config::load(cli::build(), vec![&matches]).await?;
    let options = ConsoleOptions::from_config()?;
    log::debug!("starting with {options:?}");

    if let Err(err) = youpi_term::start(options).await {
        log::error!("{err:?}");
        return Err(err);
    }

    return Ok(());
}
