use crate::color::{ColorRange, CubeColor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("calibration file {} not found, run the calibration tool first", .path.display())]
    MissingCalibrationFile { path: PathBuf },

    #[error("failed to access calibration file {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid calibration JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Calibrated HSV window per cube color.
///
/// Serialized as a JSON object keyed by lowercase color name, each value
/// holding `lower` and `upper` `[h, s, v]` triples.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalibrationProfile {
    ranges: BTreeMap<CubeColor, ColorRange>,
}

impl CalibrationProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, color: CubeColor) -> Option<&ColorRange> {
        self.ranges.get(&color)
    }

    // Replaces any earlier range for the same color.
    pub fn insert(&mut self, color: CubeColor, range: ColorRange) {
        self.ranges.insert(color, range);
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    // Load profile from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ProfileError::MissingCalibrationFile {
                    path: path.to_path_buf(),
                }
            } else {
                ProfileError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let profile: CalibrationProfile =
            serde_json::from_str(&contents).map_err(|source| ProfileError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!(
            path = %path.display(),
            colors = profile.len(),
            "Calibration profile loaded"
        );
        Ok(profile)
    }

    // Write profile as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ProfileError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| ProfileError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn red() -> ColorRange {
        ColorRange {
            lower: [170, 60, 60],
            upper: [179, 255, 255],
        }
    }

    #[test]
    fn saved_profile_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("colors.json");

        let mut profile = CalibrationProfile::new();
        profile.insert(CubeColor::Red, red());
        profile.save(&path).unwrap();

        let loaded = CalibrationProfile::load(&path).unwrap();
        assert_eq!(loaded, profile);
        assert_eq!(loaded.get(CubeColor::Red), Some(&red()));
        assert!(loaded.get(CubeColor::Blue).is_none());
    }

    #[test]
    fn reads_lowercase_keyed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("colors.json");
        std::fs::write(
            &path,
            r#"{
                "white": { "lower": [0, 0, 150], "upper": [179, 80, 255] },
                "yellow": { "lower": [20, 60, 60], "upper": [40, 255, 255] }
            }"#,
        )
        .unwrap();

        let profile = CalibrationProfile::load(&path).unwrap();
        assert_eq!(profile.len(), 2);
        assert_eq!(profile.get(CubeColor::White).unwrap().lower, [0, 0, 150]);
        assert_eq!(profile.get(CubeColor::Yellow).unwrap().upper, [40, 255, 255]);
    }

    #[test]
    fn missing_file_is_reported_as_such() {
        let dir = TempDir::new().unwrap();
        let err = CalibrationProfile::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ProfileError::MissingCalibrationFile { .. }));
        assert!(err.to_string().contains("run the calibration tool first"));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("colors.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = CalibrationProfile::load(&path).unwrap_err();
        assert!(matches!(err, ProfileError::Json { .. }));
    }

    #[test]
    fn insert_replaces_existing_entry() {
        let mut profile = CalibrationProfile::new();
        profile.insert(CubeColor::Red, red());
        let low = ColorRange {
            lower: [0, 60, 60],
            upper: [10, 255, 255],
        };
        profile.insert(CubeColor::Red, low);
        assert_eq!(profile.len(), 1);
        assert_eq!(profile.get(CubeColor::Red), Some(&low));
    }
}
