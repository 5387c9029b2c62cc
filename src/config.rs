//! Runtime configuration resolved from the environment.
//!
//! brew-guzzle has no config file. Everything it needs is either a fixed
//! location under the user's home directory or the Homebrew install itself:
//!
//! - `BREW_GUZZLE_TAPFILE`: desired taps (default `~/Tapfile`)
//! - `BREW_GUZZLE_BREWFILE`: desired formulae (default `~/Brewfile`)
//! - `HOMEBREW_BREW_FILE`: the `brew` executable (default `<prefix>/bin/brew`)
//! - `HOMEBREW_PREFIX`: the Homebrew prefix used to locate `brew`

use crate::error::{GuzzleError, Result};
use std::path::{Path, PathBuf};

pub const TAPFILE_ENV: &str = "BREW_GUZZLE_TAPFILE";
pub const BREWFILE_ENV: &str = "BREW_GUZZLE_BREWFILE";
pub const BREW_BIN_ENV: &str = "HOMEBREW_BREW_FILE";
pub const PREFIX_ENV: &str = "HOMEBREW_PREFIX";

/// Detect the Homebrew prefix on this system
pub fn detect_prefix() -> PathBuf {
    detect_prefix_with(env_path)
}

/// `$HOMEBREW_PREFIX` from `var`, else the architecture default
pub fn detect_prefix_with(var: impl Fn(&str) -> Option<PathBuf>) -> PathBuf {
    var(PREFIX_ENV).unwrap_or_else(default_prefix)
}

fn default_prefix() -> PathBuf {
    #[cfg(target_arch = "aarch64")]
    {
        PathBuf::from("/opt/homebrew")
    }
    #[cfg(not(target_arch = "aarch64"))]
    {
        PathBuf::from("/usr/local")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The `brew` executable used for probes and the final command
    pub brew_bin: PathBuf,
    /// Whitespace-separated list of desired taps
    pub tapfile: PathBuf,
    /// Whitespace-separated list of desired formulae
    pub brewfile: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::resolve(env_path, dirs::home_dir)
    }

    /// Resolve against an arbitrary variable lookup and home directory source.
    ///
    /// The home directory is only consulted for paths that were not overridden,
    /// so a fully overridden environment works without `$HOME`.
    pub fn resolve(
        var: impl Fn(&str) -> Option<PathBuf>,
        home: impl Fn() -> Option<PathBuf>,
    ) -> Result<Self> {
        let in_home = |name: &str| -> Result<PathBuf> {
            home()
                .map(|dir| dir.join(name))
                .ok_or_else(|| GuzzleError::Config("Unable to determine home directory".into()))
        };

        let tapfile = match var(TAPFILE_ENV) {
            Some(path) => path,
            None => in_home("Tapfile")?,
        };
        let brewfile = match var(BREWFILE_ENV) {
            Some(path) => path,
            None => in_home("Brewfile")?,
        };
        let brew_bin = match var(BREW_BIN_ENV) {
            Some(path) => path,
            None => default_brew_bin(&detect_prefix_with(&var)),
        };

        Ok(Self {
            brew_bin,
            tapfile,
            brewfile,
        })
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key).map(PathBuf::from)
}

fn default_brew_bin(prefix: &Path) -> PathBuf {
    prefix.join("bin").join("brew")
}
