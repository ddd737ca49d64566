use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

const DEFAULT_DIRECTIVES: &str = "info,vault_swap_core=debug";

/// Initialize the logging system with tracing. Output goes to stderr so stdout stays machine-readable.
pub fn init_logging() {
    // RUST_LOG wins; otherwise info everywhere and debug for this crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    // Format timestamps
    let timer = fmt::time::UtcTime::rfc_3339();

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_timer(timer)
            .with_file(true)
            .with_line_number(true)
            .with_span_events(FmtSpan::CLOSE),
    );

    // Initialize the subscriber
    match subscriber.try_init() {
        Ok(_) => {}
        Err(e) => eprintln!("Failed to initialize tracing subscriber: {}", e),
    }
}
