//! # Path Resolution Module
//!
//! Centralizza la logica di calcolo dei path di output.
//! Funzione pura: nessun accesso al filesystem.

use std::path::{Path, PathBuf};
use tracing::debug;

/// Utility per calcolare i path di output in modo centralizzato
pub struct PathResolver;

impl PathResolver {
    /// Calcola il path di output per un file sorgente.
    ///
    /// - senza `batch_root` (modalità file singolo): `output_root/<nome file>`
    /// - con `batch_root`: `output_root/<path relativo a batch_root>`, con
    ///   fallback al solo nome file se `source` non sta sotto `batch_root`
    pub fn get_output_path(source: &Path, batch_root: Option<&Path>, output_root: &Path) -> PathBuf {
        let file_name = source.file_name().map(Path::new).unwrap_or(source);

        let relative = match batch_root {
            None => file_name,
            Some(root) => match source.strip_prefix(root) {
                Ok(rel) if !rel.as_os_str().is_empty() => rel,
                _ => {
                    debug!(
                        "{} is not under {}, using file name only",
                        source.display(),
                        root.display()
                    );
                    file_name
                }
            },
        };

        output_root.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_file_mode_uses_file_name() {
        let dst = PathResolver::get_output_path(Path::new("/in/a/b.pdf"), None, Path::new("/out"));
        assert_eq!(dst, PathBuf::from("/out/b.pdf"));
    }

    #[test]
    fn test_batch_mode_preserves_structure() {
        let dst = PathResolver::get_output_path(Path::new("/in/a/b.pdf"), Some(Path::new("/in")), Path::new("/out"));
        assert_eq!(dst, PathBuf::from("/out/a/b.pdf"));
    }

    #[test]
    fn test_source_outside_root_falls_back_to_file_name() {
        let dst = PathResolver::get_output_path(
            Path::new("/elsewhere/x/c.pdf"),
            Some(Path::new("/in")),
            Path::new("/out"),
        );
        assert_eq!(dst, PathBuf::from("/out/c.pdf"));
    }

    #[test]
    fn test_shallow_batch_file() {
        let dst = PathResolver::get_output_path(Path::new("/in/top.PDF"), Some(Path::new("/in")), Path::new("/out"));
        assert_eq!(dst, PathBuf::from("/out/top.PDF"));
    }
}
