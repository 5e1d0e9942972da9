//! Log output setup

use tracing_subscriber::EnvFilter;

/// Install the global subscriber; `RUST_LOG` takes precedence over `verbose`
pub fn init(verbose: u8) {
    let default = match verbose {
        0 => "routeshift_cli=info,routeshift_transform=warn",
        1 => "routeshift_cli=debug,routeshift_transform=debug",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose > 0)
        .with_writer(std::io::stderr)
        .init();
}
