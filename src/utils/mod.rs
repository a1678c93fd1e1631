//! Utilities: logging setup (verbosity flags -> tracing level).
//!
//! Key items:
//!   derive_level / init_logging

/// Logging helpers.
pub mod logging {
    use tracing::Level;
    use tracing_subscriber::EnvFilter;

    /// `-q` wins over `-v`; default is INFO.
    pub fn derive_level(verbose: u8, quiet: bool) -> Level {
        if quiet {
            return Level::ERROR;
        }
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// Install a stderr fmt subscriber. `RUST_LOG`, when set, overrides `level`.
    /// Calling this twice is harmless (the second install is ignored).
    pub fn init_logging(level: Level) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn quiet_overrides_verbose() {
            assert_eq!(derive_level(2, true), Level::ERROR);
        }

        #[test]
        fn verbosity_steps() {
            assert_eq!(derive_level(0, false), Level::INFO);
            assert_eq!(derive_level(1, false), Level::DEBUG);
            assert_eq!(derive_level(5, false), Level::TRACE);
        }

        #[test]
        fn init_twice_does_not_panic() {
            init_logging(Level::ERROR);
            init_logging(Level::DEBUG);
        }
    }
}

pub use logging::{derive_level, init_logging};
