use tracing_subscriber::{EnvFilter, fmt};

/// Install the stdout subscriber used by every provisioning message.
pub fn init() {
    // RUST_LOG=info,aws_config=warn,...  (defaults to info)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let ansi = std::env::var_os("NO_COLOR").is_none();
    fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_target(false)
        .without_time()
        .init();
}
