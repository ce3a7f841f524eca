use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

/// Application-level constants
pub const APP_NAME: &str = "CareTrack";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the application data directory
/// ~/CareTrack/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("CareTrack")
}

/// Get the state directory holding the persisted store records
/// (`goalEntries.json`, `auditLogs.json`).
pub fn state_dir() -> PathBuf {
    app_data_dir().join("state")
}

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_PKG_NAME"))
}

/// Initialize tracing for binaries embedding the crate.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_filter())),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("CareTrack"));
    }

    #[test]
    fn state_dir_under_app_data() {
        let state = state_dir();
        let app = app_data_dir();
        assert!(state.starts_with(app));
        assert!(state.ends_with("state"));
    }

    #[test]
    fn app_name_is_caretrack() {
        assert_eq!(APP_NAME, "CareTrack");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn default_filter_names_this_crate() {
        assert!(default_log_filter().contains("caretrack"));
    }
}
