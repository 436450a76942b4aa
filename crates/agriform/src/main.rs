//! AgriForm CLI - scheme submission form engine driver
//!
//! Binary name: `agf`

use std::process;

use agriform::cli;

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber for logging; stdout stays
    // machine-parseable, so everything goes to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli::run().await {
        #[allow(clippy::print_stderr)]
        {
            eprintln!("Error: {err:#}");
        }

        let code = err
            .downcast_ref::<agriform_core::FormError>()
            .map(agriform_core::FormError::exit_code)
            .unwrap_or(1);

        #[allow(clippy::exit)]
        process::exit(code);
    }
}
