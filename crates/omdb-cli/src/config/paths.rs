//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path.
///
/// Lookup order:
/// 1. `{dir}/config.toml` when `--dir` is given.
/// 2. `$XDG_CONFIG_HOME/omdb/config.toml`.
/// 3. `$HOME/.config/omdb/config.toml`.
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set
/// (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }
    from_env(
        std::env::var_os("XDG_CONFIG_HOME").as_deref().map(Path::new),
        std::env::var_os("HOME").as_deref().map(Path::new),
    )
}

fn from_env(xdg_config_home: Option<&Path>, home: Option<&Path>) -> Result<PathBuf> {
    // An empty XDG_CONFIG_HOME counts as unset.
    if let Some(xdg) = xdg_config_home.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(xdg.join("omdb").join(CONFIG_FILE));
    }
    let Some(home) = home else {
        bail!("neither XDG_CONFIG_HOME nor HOME is set");
    };
    Ok(home.join(".config").join("omdb").join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_resolve_with_dir() {
        // Arrange
        let dir = PathBuf::from("/tmp/omdb-test");

        // Act
        let path = resolve_config_path(Some(&dir)).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/tmp/omdb-test/config.toml"));
    }

    #[test]
    fn test_xdg_takes_precedence() {
        // Arrange & Act
        let path = from_env(Some(Path::new("/xdg")), Some(Path::new("/home/u"))).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/xdg/omdb/config.toml"));
    }

    #[test]
    fn test_empty_xdg_falls_back_to_home() {
        // Arrange & Act
        let path = from_env(Some(Path::new("")), Some(Path::new("/home/u"))).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/home/u/.config/omdb/config.toml"));
    }

    #[test]
    fn test_no_home_is_an_error() {
        // Arrange & Act
        let result = from_env(None, None);

        // Assert
        assert!(result.is_err());
    }
}
