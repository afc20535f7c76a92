// src/logging.rs
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "warn,statement_analyzer=info";

/// Installs the console subscriber. `RUST_LOG` overrides the default filter.
/// Safe to call more than once.
pub fn init_logging() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let installed = tracing_subscriber::fmt()
            .compact()
            .with_target(false)
            .with_env_filter(env_filter)
            .try_init();

        if installed.is_err() {
            tracing::warn!("global subscriber already set, keeping it");
            return;
        }

        tracing::info!("logging initialised");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_logging();
        init_logging();
    }
}
