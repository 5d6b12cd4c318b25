//! Saved configuration snapshots
//!
//! Every run writes its configuration next to the generated files so the
//! same form can be regenerated later without answering the prompts again.

use crate::error::{GenerateError, SnapshotError};
use crate::spec::wire::SnapshotForm;
use crate::spec::FormSpec;
use crate::GENERATOR_VERSION;
use semver::Version;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// How deep [`discover_snapshots`] looks below the starting directory
const DISCOVERY_DEPTH: usize = 3;

const SNAPSHOT_SUFFIXES: &[&str] = &["Config.json", "Config.yaml", "Config.yml"];

/// A snapshot loaded from disk
#[derive(Debug, Clone)]
pub struct LoadedSnapshot {
    pub spec: FormSpec,
    /// Version of the generator that wrote it, if recorded
    pub generator_version: Option<String>,
}

impl LoadedSnapshot {
    /// Warning when the snapshot was written by a newer generator
    pub fn compatibility_warning(&self) -> Option<String> {
        self.generator_version
            .as_deref()
            .and_then(|v| check_compatibility(GENERATOR_VERSION, v))
    }
}

/// Load a snapshot; YAML for `.yaml`/`.yml` files, JSON otherwise
pub fn load_snapshot(path: &Path) -> Result<LoadedSnapshot, SnapshotError> {
    let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );

    // Wire form first; the recorded version is not part of `FormSpec`.
    let raw: SnapshotForm = if is_yaml {
        serde_yaml::from_str(&content).map_err(|source| SnapshotError::Yaml {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_json::from_str(&content).map_err(|source| SnapshotError::Json {
            path: path.to_path_buf(),
            source,
        })?
    };
    let generator_version = raw.generator_version().map(str::to_string);

    let spec = FormSpec::try_from(raw).map_err(|e| SnapshotError::Invalid {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(LoadedSnapshot {
        spec,
        generator_version,
    })
}

/// Pretty-printed JSON snapshot of `spec`, stamped with the generator version
pub fn to_json(spec: &FormSpec) -> Result<String, GenerateError> {
    let mut raw = SnapshotForm::from(spec.clone());
    raw.stamp_version(GENERATOR_VERSION);
    let mut json = serde_json::to_string_pretty(&raw)?;
    json.push('\n');
    Ok(json)
}

/// Compare the running generator against the one that wrote a snapshot
///
/// Returns a warning if the snapshot is newer. Unparseable versions are not
/// compared.
pub fn check_compatibility(generator_version: &str, snapshot_version: &str) -> Option<String> {
    let current = Version::parse(generator_version.trim_start_matches('v')).ok()?;
    let written_by = Version::parse(snapshot_version.trim_start_matches('v')).ok()?;

    if current < written_by {
        Some(format!(
            "This configuration was saved by formgen {}; you are running {}.\n\
             Options added since may be ignored. Consider updating: cargo install formgen-tools --force",
            written_by, current
        ))
    } else {
        None
    }
}

/// Find saved snapshots below `dir`, sorted by path
pub fn discover_snapshots(dir: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(DISCOVERY_DEPTH)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let name = entry.file_name().to_string_lossy();
            SNAPSHOT_SUFFIXES
                .iter()
                .any(|suffix| name.ends_with(suffix) && name.len() > suffix.len())
        })
        .map(|entry| entry.into_path())
        .collect();
    found.sort();
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{ButtonSpec, ButtonVariant, FieldSpec, FieldType};
    use tempfile::TempDir;

    fn spec() -> FormSpec {
        let mut spec = FormSpec::new("Feedback");
        spec.fields = vec![FieldSpec::new("comment", FieldType::Textarea)];
        spec.buttons = vec![ButtonSpec::new("Submit", ButtonVariant::Default)];
        spec
    }

    #[test]
    fn test_json_round_trip_keeps_version() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("FeedbackConfig.json");
        std::fs::write(&path, to_json(&spec()).unwrap()).unwrap();

        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded.spec, spec());
        assert_eq!(loaded.generator_version.as_deref(), Some(GENERATOR_VERSION));
        assert!(loaded.compatibility_warning().is_none());
    }

    #[test]
    fn test_yaml_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("FeedbackConfig.yaml");
        std::fs::write(
            &path,
            "formName: Feedback\nsubmitButtonIndex: 1\nformStyle: Inline\nbuttons:\n  - name: Submit\ninputFields:\n  - name: comment\n    type: textarea\n",
        )
        .unwrap();

        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded.spec.name, "Feedback");
        assert_eq!(loaded.spec.fields[0].field_type, FieldType::Textarea);
        assert!(loaded.generator_version.is_none());
    }

    #[test]
    fn test_load_errors_carry_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("NopeConfig.json");
        let err = load_snapshot(&missing).unwrap_err();
        assert!(matches!(err, SnapshotError::Read { .. }));
        assert!(err.to_string().contains("NopeConfig.json"));

        let broken = dir.path().join("BrokenConfig.json");
        std::fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(
            load_snapshot(&broken).unwrap_err(),
            SnapshotError::Json { .. }
        ));

        let invalid = dir.path().join("BadConfig.json");
        std::fs::write(&invalid, r#"{ "formName": "Bad", "submitButtonIndex": 1, "routerType": "remix" }"#)
            .unwrap();
        let err = load_snapshot(&invalid).unwrap_err();
        assert!(err.to_string().contains("routerType"));
    }

    #[test]
    fn test_newer_snapshot_warns() {
        assert!(check_compatibility("0.1.0", "0.2.0").is_some());
        assert!(check_compatibility("0.2.0", "0.1.0").is_none());
        assert!(check_compatibility("0.1.0", "0.1.0").is_none());
        assert!(check_compatibility("0.1.0", "v0.3.1").unwrap().contains("0.3.1"));
        assert!(check_compatibility("invalid", "0.1.0").is_none());
    }

    #[test]
    fn test_discover_snapshots() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("generated-form");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("ContactConfig.json"), "{}").unwrap();
        std::fs::write(dir.path().join("SignupConfig.yml"), "").unwrap();
        std::fs::write(dir.path().join("Config.json"), "{}").unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();

        let found = discover_snapshots(dir.path());
        let names: Vec<String> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"ContactConfig.json".to_string()));
        assert!(names.contains(&"SignupConfig.yml".to_string()));
    }
}
