use circulation_desk::utils::{logger, validation::Validate};
use circulation_desk::{CliArgs, Library, Session};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config = match args.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if args.json_logs || config.json_logs() {
        logger::init_json_logger(args.verbose, config.log_level());
    } else {
        logger::init_cli_logger(args.verbose, config.log_level());
    }

    tracing::info!("Starting circulation desk");
    if args.verbose {
        tracing::debug!("Desk config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {} ({:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let mut session = Session::new(Library::from_config(&config));

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let handled = session.run(stdin.lock(), stdout.lock())?;

    tracing::info!("Processed {} commands", handled);
    Ok(())
}
