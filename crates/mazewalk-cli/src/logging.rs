//! Log output for the command-line tool.
//!
//! The library crates log through the `log` facade; the subscriber installed
//! here also picks those records up, so one filter controls everything.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when neither flags nor environment say otherwise. Targets
/// match by prefix, so this covers `mazewalk_core` and `mazewalk_search` too.
const DEFAULT_FILTER: &str = "mazewalk=warn";

/// Install a stderr subscriber.
///
/// Precedence, highest first: `RUST_LOG`, `MAZEWALK_LOG`, `--log-level`,
/// `--verbose`, then warnings only.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let directives = filter_directives(verbose, log_level);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("MAZEWALK_LOG"))
        .or_else(|_| EnvFilter::try_new(&directives))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()?;
    Ok(())
}

/// Directives for the flags alone. A bare level applies to the mazewalk
/// crates; anything containing `=` is used as given.
fn filter_directives(verbose: bool, log_level: Option<&str>) -> String {
    match (verbose, log_level) {
        (_, Some(level)) if level.contains('=') => level.to_string(),
        (_, Some(level)) => format!("mazewalk={level}"),
        (true, None) => "mazewalk=debug".to_string(),
        (false, None) => DEFAULT_FILTER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_warn() {
        assert_eq!(filter_directives(false, None), DEFAULT_FILTER);
    }

    #[test]
    fn verbose_is_debug() {
        assert_eq!(filter_directives(true, None), "mazewalk=debug");
    }

    #[test]
    fn level_overrides_verbose() {
        assert_eq!(filter_directives(true, Some("trace")), "mazewalk=trace");
        assert_eq!(
            filter_directives(false, Some("mazewalk_search=trace")),
            "mazewalk_search=trace"
        );
    }

    #[test]
    fn directives_parse() {
        for d in [
            filter_directives(false, None),
            filter_directives(true, None),
            filter_directives(false, Some("info")),
        ] {
            assert!(EnvFilter::try_new(&d).is_ok(), "{d}");
        }
    }
}
