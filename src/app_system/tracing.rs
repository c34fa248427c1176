/// Configure tracing once at application startup.
///
/// Defaults to `warn` so log lines stay out of the menu output; set
/// `RUST_LOG` to raise verbosity:
///
/// ```bash
/// RUST_LOG=debug cargo run
/// RUST_LOG=marketplace::catalog=debug cargo run
/// ```
pub fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
