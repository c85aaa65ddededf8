//! Default configuration locations.

use std::path::PathBuf;

/// Per-user gatehouse config directory (`~/.config/gatehouse` on Linux).
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gatehouse"))
}

/// Default user-level hooks file inside the config directory.
pub fn user_hooks_path() -> Option<PathBuf> {
    user_config_dir().map(|dir| dir.join("hooks.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_hooks_path_layout() {
        if let Some(path) = user_hooks_path() {
            assert!(path.ends_with("gatehouse/hooks.json"));
        }
    }
}
