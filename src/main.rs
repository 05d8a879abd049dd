use std::process;

use pydeptree::cli::{Args, Command};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let args = Args::parse_args();
    init_logging(args.verbose);

    tracing::debug!("{} v{}", pydeptree::NAME, pydeptree::VERSION);

    let command = Command::from_args(args);
    process::exit(command.run());
}

/// Log to stderr, filtered by `RUST_LOG` when set
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "pydeptree=debug" } else { "pydeptree=warn" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
