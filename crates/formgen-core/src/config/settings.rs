//! Output location settings

use std::path::{Path, PathBuf};

/// Environment variable overriding the output directory
pub const OUTPUT_DIR_ENV: &str = "FORMGEN_OUTPUT_DIR";

/// Output directory used when nothing else is configured
pub const DEFAULT_OUTPUT_DIR: &str = "generated-form";

/// Where and whether generated files are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSettings {
    pub output_dir: PathBuf,
    /// Report what would be written without touching the filesystem
    pub dry_run: bool,
}

impl OutputSettings {
    /// Resolve the output directory: explicit flag, then environment, then default
    pub fn resolve(explicit: Option<PathBuf>, dry_run: bool) -> Self {
        let env_dir = std::env::var(OUTPUT_DIR_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty());
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::resolve_from(explicit, env_dir, &current_dir, dry_run)
    }

    fn resolve_from(
        explicit: Option<PathBuf>,
        env_dir: Option<String>,
        current_dir: &Path,
        dry_run: bool,
    ) -> Self {
        let dir = explicit
            .or_else(|| env_dir.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let output_dir = if dir.is_absolute() {
            dir
        } else {
            current_dir.join(dir)
        };

        Self {
            output_dir,
            dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_dir_wins() {
        let s = OutputSettings::resolve_from(
            Some(PathBuf::from("out")),
            Some("from-env".to_string()),
            Path::new("/work"),
            false,
        );
        assert_eq!(s.output_dir, PathBuf::from("/work/out"));
    }

    #[test]
    fn test_env_dir_before_default() {
        let s = OutputSettings::resolve_from(
            None,
            Some("/tmp/forms".to_string()),
            Path::new("/work"),
            true,
        );
        assert_eq!(s.output_dir, PathBuf::from("/tmp/forms"));
        assert!(s.dry_run);
    }

    #[test]
    fn test_default_dir() {
        let s = OutputSettings::resolve_from(None, None, Path::new("/work"), false);
        assert_eq!(s.output_dir, PathBuf::from("/work/generated-form"));
    }
}
