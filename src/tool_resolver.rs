//! # Tool Path Resolver
//!
//! Finds the external compressor binary:
//! - an override directory from `PDFCOMPRESS_TOOLS_DIR`
//! - the system `PATH`
//!
//! Ghostscript ships under different executable names per platform
//! (`gswin64c`/`gswin32c` on Windows, `gs` elsewhere).

use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable pointing at a directory of bundled tools
pub const TOOLS_DIR_ENV: &str = "PDFCOMPRESS_TOOLS_DIR";

/// Tool path resolver for system and bundled binaries
#[derive(Debug, Clone)]
pub struct ToolPathResolver {
    /// Directory searched before PATH
    tools_dir: Option<PathBuf>,
    /// Fall back to the system PATH
    search_path: bool,
}

impl ToolPathResolver {
    /// Create a resolver honouring `PDFCOMPRESS_TOOLS_DIR`
    pub fn new() -> Self {
        let tools_dir = env::var_os(TOOLS_DIR_ENV)
            .map(PathBuf::from)
            .filter(|dir| dir.is_dir());

        if let Some(ref dir) = tools_dir {
            debug!("Using tools directory from {}: {}", TOOLS_DIR_ENV, dir.display());
        }

        Self {
            tools_dir,
            search_path: true,
        }
    }

    /// Resolver that only looks inside `dir` (no PATH lookup)
    pub fn with_tools_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            tools_dir: Some(dir.into()),
            search_path: false,
        }
    }

    /// Executable names tried for Ghostscript, in order of preference
    pub fn ghostscript_names() -> &'static [&'static str] {
        if cfg!(windows) {
            &["gswin64c", "gswin32c", "gs"]
        } else {
            &["gs"]
        }
    }

    /// Resolve the Ghostscript executable
    pub fn ghostscript(&self) -> Option<PathBuf> {
        Self::ghostscript_names()
            .iter()
            .find_map(|name| self.resolve_tool(name))
    }

    /// Resolve the path to a specific tool
    pub fn resolve_tool(&self, tool_name: &str) -> Option<PathBuf> {
        if let Some(ref tools_dir) = self.tools_dir {
            let bundled = tools_dir.join(Self::executable_name(tool_name));
            if bundled.is_file() {
                debug!("Using bundled tool: {} -> {}", tool_name, bundled.display());
                return Some(bundled);
            }
        }

        if !self.search_path {
            return None;
        }

        let found = self.find_in_system_path(tool_name);
        match found {
            Some(ref path) => debug!("Using system tool: {} -> {}", tool_name, path.display()),
            None => debug!("Tool not found on PATH: {}", tool_name),
        }
        found
    }

    fn executable_name(tool_name: &str) -> String {
        if cfg!(windows) {
            format!("{}.exe", tool_name)
        } else {
            tool_name.to_string()
        }
    }

    /// Find tool in system PATH
    fn find_in_system_path(&self, tool_name: &str) -> Option<PathBuf> {
        let executable = Self::executable_name(tool_name);
        let path_var = env::var_os("PATH")?;

        env::split_paths(&path_var)
            .map(|dir| dir.join(&executable))
            .find(|path| Self::is_executable(path))
    }

    #[cfg(unix)]
    fn is_executable(path: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;
        path.metadata()
            .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    fn is_executable(path: &Path) -> bool {
        path.is_file()
    }

    /// Installation hint shown when Ghostscript is missing
    pub fn install_instructions() -> &'static str {
        if cfg!(target_os = "macos") {
            "brew install ghostscript"
        } else if cfg!(target_os = "linux") {
            "sudo apt-get install ghostscript"
        } else {
            "download from https://ghostscript.com/releases/"
        }
    }

    /// Resolve Ghostscript or describe how to install it
    pub fn check_ghostscript(&self) -> Result<PathBuf, String> {
        self.ghostscript().ok_or_else(|| {
            format!(
                "Ghostscript ({}) not found. Install with: {}",
                Self::ghostscript_names().join("/"),
                Self::install_instructions()
            )
        })
    }
}

impl Default for ToolPathResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_tool_in_empty_tools_dir() {
        let temp = TempDir::new().unwrap();
        let resolver = ToolPathResolver::with_tools_dir(temp.path());
        assert!(resolver.ghostscript().is_none());

        let err = resolver.check_ghostscript().unwrap_err();
        assert!(err.contains("not found"));
        assert!(err.contains(ToolPathResolver::install_instructions()));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolves_bundled_tool() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let gs = temp.path().join("gs");
        std::fs::write(&gs, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&gs, std::fs::Permissions::from_mode(0o755)).unwrap();

        let resolver = ToolPathResolver::with_tools_dir(temp.path());
        assert_eq!(resolver.ghostscript(), Some(gs));
    }
}
