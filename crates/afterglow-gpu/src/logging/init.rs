use std::sync::Once;

/// Options for the workspace logger.
///
/// An explicit `env_filter` (env_logger syntax, e.g.
/// "afterglow_chain=debug,wgpu=warn") wins over the `RUST_LOG` environment
/// variable. With neither present the level defaults to info, which keeps
/// render-target lifecycle events visible without flooding the frame loop.
/// `write_style` controls ANSI coloring.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl LoggingConfig {
    /// Config pinned to a fixed filter string, ignoring `RUST_LOG`.
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            env_filter: Some(filter.into()),
            ..Self::default()
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the `env_logger` backend for the whole process.
///
/// Safe to call repeatedly; only the first call takes effect. Call it before
/// [`crate::Gpu`] bring-up so adapter selection messages are not dropped.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.env_filter {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => match std::env::var("RUST_LOG") {
                Ok(filter) => {
                    builder.parse_filters(&filter);
                }
                // Loader diagnostics arrive at warn; info keeps target
                // lifecycle events visible too.
                Err(_) => {
                    builder.filter_level(log::LevelFilter::Info);
                }
            },
        }

        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logger installed");
    });
}
