//! Preset file persistence
//!
//! Presets are stored as human-editable YAML. Saving refuses to overwrite an
//! existing file; loading tolerates unknown fields and leaves structural
//! checks to [`crate::validate`].

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use tracing::debug;

use crate::error::Error;
use crate::preset::Preset;

/// Load a preset from a YAML file.
pub fn load(path: &Path) -> Result<Preset, Error> {
    debug!(path = %path.display(), "loading preset");
    let contents = std::fs::read_to_string(path).map_err(|source| Error::ReadPreset {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_yaml::from_str(&contents)?)
}

/// Save a preset to a YAML file. Fails with [`Error::FileExists`] if the
/// target is already present, leaving it untouched.
pub fn save(preset: &Preset, path: &Path) -> Result<(), Error> {
    debug!(path = %path.display(), "saving preset");
    let rendered = serde_yaml::to_string(preset)?;

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            return Err(Error::FileExists(path.to_path_buf()))
        }
        Err(source) => {
            return Err(Error::WritePreset {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    file.write_all(rendered.as_bytes())
        .map_err(|source| Error::WritePreset {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::preset::ScalableResource;

    fn sample_preset() -> Preset {
        let mut preset = Preset::new("nightly", "billing");
        preset.deployments.push(ScalableResource {
            name: "api".to_string(),
            replicas: 3,
        });
        preset.deployments.push(ScalableResource {
            name: "worker".to_string(),
            replicas: 0,
        });
        preset.stateful_sets.push(ScalableResource {
            name: "db".to_string(),
            replicas: 1,
        });
        preset
    }

    #[test]
    fn round_trip_preserves_fields_and_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nightly.yml");
        let preset = sample_preset();

        save(&preset, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, preset);
    }

    #[test]
    fn saved_file_uses_the_fixed_field_names() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nightly.yml");

        save(&sample_preset(), &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();

        assert!(contents.contains("name: nightly"));
        assert!(contents.contains("namespace: billing"));
        assert!(contents.contains("deployments:"));
        assert!(contents.contains("stateFulSets:"));
    }

    #[test]
    fn save_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nightly.yml");
        std::fs::write(&path, "original contents").unwrap();

        let err = save(&sample_preset(), &path).unwrap_err();

        assert!(matches!(err, Error::FileExists(_)));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "original contents"
        );
    }

    #[test]
    fn load_missing_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let err = load(&dir.path().join("absent.yml")).unwrap_err();
        assert!(matches!(err, Error::ReadPreset { .. }));
    }

    #[test]
    fn load_ignores_unknown_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preset.yml");
        std::fs::write(
            &path,
            "name: nightly\nnamespace: billing\ncomment: scratch\ndeployments: []\nstateFulSets: []\n",
        )
        .unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.name, "nightly");
        assert!(loaded.deployments.is_empty());
    }

    #[test]
    fn load_accepts_negative_replicas_for_validation_to_catch() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preset.yml");
        std::fs::write(
            &path,
            "name: nightly\nnamespace: billing\ndeployments:\n  - name: api\n    replicas: -2\nstateFulSets: []\n",
        )
        .unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.deployments[0].replicas, -2);
    }

    #[test]
    fn load_defaults_missing_top_level_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preset.yml");
        std::fs::write(&path, "name: nightly\ndeployments: []\nstateFulSets: []\n").unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.namespace, "");
    }
}
