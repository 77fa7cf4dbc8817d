//! Paths inside the Zellij plugin sandbox.
//!
//! With full host access the host filesystem is visible under `/host`, rooted
//! at the directory Zellij was started from (normally the home directory).

use std::path::PathBuf;

/// Default directory for stored contacts and trace files.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zcontacts")
}

/// Rewrites a leading `~` to the sandbox's `/host` mount.
///
/// ```rust
/// use zcontacts::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/Pictures/me.png"), "/host/Pictures/me.png");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/host/me.png"), "/host/me.png");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

/// Drops the `/host` mount prefix for display.
#[must_use]
pub fn strip_host_prefix(path: &str) -> String {
    path.strip_prefix("/host").unwrap_or(path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_only_expands_at_start() {
        assert_eq!(expand_tilde("pics/~me.png"), "pics/~me.png");
        assert_eq!(expand_tilde("~user/me.png"), "~user/me.png");
    }

    #[test]
    fn host_prefix_round_trip() {
        assert_eq!(strip_host_prefix(&expand_tilde("~/a.png")), "/a.png");
        assert_eq!(strip_host_prefix("/tmp/a.png"), "/tmp/a.png");
    }

    #[test]
    fn data_dir_is_under_zellij_share() {
        assert!(get_data_dir().ends_with(".local/share/zellij/zcontacts"));
    }
}
