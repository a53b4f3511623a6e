//! User-directory resolution.
//!
//! Priority for the user-level base directory:
//!   1. `ADCONNECT_HOME` env var (if set and non-empty)
//!   2. `dirs::config_dir().map(|d| d.join("adconnect"))` (platform default)

use std::path::PathBuf;

/// Return the `ADCONNECT_HOME` path when set and non-empty, otherwise
/// fall through to the platform-native `dirs_fallback`.
fn resolve_user_path(dirs_fallback: Option<PathBuf>) -> Option<PathBuf> {
    if let Ok(home) = std::env::var("ADCONNECT_HOME")
        && !home.is_empty()
    {
        return Some(PathBuf::from(home));
    }
    dirs_fallback
}

/// Returns the adconnect user-level base directory.
pub fn user_dir() -> Option<PathBuf> {
    resolve_user_path(dirs::config_dir().map(|d| d.join("adconnect")))
}

/// Returns the user-level config file path (`<user dir>/config.toml`).
pub fn user_config_file() -> Option<PathBuf> {
    user_dir().map(|d| d.join("config.toml"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serial_test::serial;

    use super::*;

    fn set_home(val: &str) {
        // SAFETY: test-only env mutation; #[serial] prevents races.
        unsafe { std::env::set_var("ADCONNECT_HOME", val) };
    }

    fn clear_home() {
        unsafe { std::env::remove_var("ADCONNECT_HOME") };
    }

    #[test]
    #[serial]
    fn user_dir_uses_home_override_when_set() {
        set_home("/custom/adconnect");
        let result = user_dir();
        clear_home();
        assert_eq!(result, Some(PathBuf::from("/custom/adconnect")));
    }

    #[test]
    #[serial]
    fn empty_override_falls_back_to_platform_config() {
        set_home("");
        let result = user_config_file();
        clear_home();
        assert_eq!(
            result,
            dirs::config_dir().map(|d| d.join("adconnect").join("config.toml"))
        );
    }

    #[test]
    #[serial]
    fn user_dir_fallback_matches_dirs_crate() {
        clear_home();
        assert_eq!(user_dir(), dirs::config_dir().map(|d| d.join("adconnect")));
    }

    #[test]
    #[serial]
    fn config_file_lives_in_user_dir() {
        set_home("/unified/home");
        let result = user_config_file();
        clear_home();
        assert_eq!(result, Some(PathBuf::from("/unified/home/config.toml")));
    }
}
