use env_logger::Env;

const DEFAULT_LOG_FILTER: &str = "warn,media_timeline=info";

/// installs the logger, `RUST_LOG` overrides the default filter
pub fn setup() {
    env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_LOG_FILTER)).init();
}
