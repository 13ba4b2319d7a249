//! Logging setup

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Level selected by the `debug` config switch
pub fn log_level(debug: bool) -> Level {
    if debug {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Filter directive enabling every engine crate at the configured level
pub fn filter_directive(debug: bool) -> String {
    let level = log_level(debug);
    ["griefprevention", "griefprevention_core", "griefprevention_host"]
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global fmt subscriber.
///
/// Returns `false` if a subscriber was already installed; the existing one
/// is kept.
pub fn init_logging(debug: bool) -> bool {
    let filter = EnvFilter::new(filter_directive(debug));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(true), Level::DEBUG);
        assert_eq!(log_level(false), Level::INFO);
    }

    #[test]
    fn test_filter_covers_every_crate() {
        let directive = filter_directive(true);
        assert_eq!(
            directive,
            "griefprevention=DEBUG,griefprevention_core=DEBUG,griefprevention_host=DEBUG"
        );
        assert!(filter_directive(false).contains("griefprevention_host=INFO"));
        assert!(directive.parse::<EnvFilter>().is_ok());
    }

    #[test]
    fn test_repeated_init_is_harmless() {
        init_logging(false);
        assert!(!init_logging(true));
    }
}
