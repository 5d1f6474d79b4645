//! # File I/O Module
//!
//! Reads beam model documents and writes results:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility
//!
//! ## File Format
//!
//! Model documents are JSON:
//!
//! ```json
//! {
//!   "version": "1.0.0",
//!   "spans": [{"length": 20.0, "EI": 3.0e10}, {"length": 25.0, "EI": 3.0e10}],
//!   "supports": [{"type": "pin"}, {"type": "pin"}, {"type": "pin"}],
//!   "loads": [{"kind": "uniform", "span": 0, "magnitude": 35000.0}],
//!   "settings": {"samples_per_span": 100}
//! }
//! ```
//!
//! `version` and `settings` are optional.
//!
//! ## Example
//!
//! ```rust,no_run
//! use beam_core::file_io::{load_model, save_result};
//! use beam_core::calculations::solve_with_options;
//! use std::path::Path;
//!
//! let document = load_model(Path::new("bridge.json"))?;
//! let result = solve_with_options(&document.model, &document.settings)?;
//! save_result(&result, Path::new("bridge.result.json"))?;
//! # Ok::<(), beam_core::errors::BeamError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calculations::continuous_beam::{AnalysisOptions, AnalysisResult};
use crate::errors::{BeamError, BeamResult};
use crate::model::BeamModel;

/// Current model document schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// A model plus the settings to analyse it with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    /// Schema version the document was written for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Spans, supports and loads
    #[serde(flatten)]
    pub model: BeamModel,

    /// Analysis settings
    #[serde(default)]
    pub settings: AnalysisOptions,
}

impl ModelDocument {
    /// Wrap a model with default settings and the current schema version
    pub fn new(model: BeamModel) -> Self {
        Self {
            version: Some(SCHEMA_VERSION.to_string()),
            model,
            settings: AnalysisOptions::default(),
        }
    }
}

/// Parse a model document from a JSON string.
///
/// # Returns
///
/// * `Ok(ModelDocument)` - Parsed document (not yet validated as a model)
/// * `Err(BeamError::VersionMismatch)` - Document version is incompatible
/// * `Err(BeamError::SerializationError)` - Invalid JSON or missing fields
pub fn parse_model(json: &str) -> BeamResult<ModelDocument> {
    let document: ModelDocument = serde_json::from_str(json)?;
    if let Some(version) = &document.version {
        validate_version(version)?;
    }
    Ok(document)
}

/// Load a model document from a file.
///
/// # Returns
///
/// * `Ok(ModelDocument)` - Successfully loaded document
/// * `Err(BeamError::VersionMismatch)` - File version is incompatible
/// * `Err(BeamError::SerializationError)` - Invalid JSON
/// * `Err(BeamError::FileError)` - I/O error
pub fn load_model(path: &Path) -> BeamResult<ModelDocument> {
    let mut file =
        File::open(path).map_err(|e| BeamError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| BeamError::file_error("read", path.display().to_string(), e.to_string()))?;

    parse_model(&contents).map_err(|e| match e {
        BeamError::SerializationError { reason } => {
            BeamError::serialization(format!("Invalid JSON in {}: {}", path.display(), reason))
        }
        other => other,
    })
}

/// Save any serializable value as pretty JSON with atomic write semantics.
///
/// The save process:
/// 1. Serialize to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp over the target (atomic on most filesystems)
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> BeamResult<()> {
    let json = serde_json::to_string_pretty(value)?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        BeamError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        BeamError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        BeamError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        BeamError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Save an analysis result
pub fn save_result(result: &AnalysisResult, path: &Path) -> BeamResult<()> {
    save_json(result, path)
}

/// Save a model document
pub fn save_model(document: &ModelDocument, path: &Path) -> BeamResult<()> {
    save_json(document, path)
}

/// Temp file next to the target: `result.json` → `result.json.tmp`
fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Validate that a document version is compatible with the current schema.
///
/// Major versions must match and the document's minor version may not be
/// newer than ours.
pub fn validate_version(file_version: &str) -> BeamResult<()> {
    let mismatch = || BeamError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let parse = |v: &str| -> Option<Vec<u32>> { v.split('.').map(|p| p.trim().parse().ok()).collect() };
    let file_parts = parse(file_version).ok_or_else(mismatch)?;
    let current_parts = parse(SCHEMA_VERSION).ok_or_else(mismatch)?;

    if file_parts.first() != current_parts.first() {
        return Err(mismatch());
    }
    if let (Some(file_minor), Some(current_minor)) = (file_parts.get(1), current_parts.get(1)) {
        if file_minor > current_minor {
            return Err(mismatch());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::Load;
    use std::env::temp_dir;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("girder_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_parse_minimal_document() {
        let json = r#"{
            "spans": [{"length": 20.0, "EI": 3.0e10}, {"length": 25.0, "EI": 3.0e10}],
            "supports": [{"type": "pin"}, {"type": "pin"}, {"type": "pin"}],
            "loads": [{"kind": "uniform", "span": 0, "magnitude": 35000.0}]
        }"#;
        let document = parse_model(json).unwrap();
        assert_eq!(document.version, None);
        assert_eq!(document.model.span_count(), 2);
        assert_eq!(document.model.loads[0], Load::uniform(0, 35000.0));
        assert_eq!(document.settings, AnalysisOptions::default());
    }

    #[test]
    fn test_parse_settings() {
        let json = r#"{
            "version": "1.0",
            "spans": [{"length": 5.0, "EI": 1.0}],
            "supports": [{"type": "fixed"}, {"type": "free"}],
            "settings": {"samples_per_span": 10}
        }"#;
        let document = parse_model(json).unwrap();
        assert!(document.model.loads.is_empty());
        assert_eq!(document.settings.samples_per_span, 10);
        assert_eq!(document.settings.equilibrium_tolerance, 1e-6);
    }

    #[test]
    fn test_parse_errors() {
        let err = parse_model("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        let err = parse_model(r#"{"spans": [], "supports": [{"type": "hinge"}]}"#).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_oversized_resolution_rejected_before_solving() {
        let json = r#"{
            "spans": [{"length": 5.0, "EI": 1.0}],
            "supports": [{"type": "pin"}, {"type": "pin"}],
            "settings": {"samples_per_span": 18446744073709551615}
        }"#;
        let document = parse_model(json).unwrap();
        let err = crate::calculations::solve_with_options(&document.model, &document.settings).unwrap_err();
        assert_eq!(err.field(), Some("settings.samples_per_span"));
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version("1.0.0").is_ok());
        assert!(validate_version("1.0").is_ok());
        assert!(validate_version("1.5.0").is_err());
        assert!(validate_version("2.0.0").is_err());
        assert!(validate_version("latest").is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("roundtrip");
        let document = ModelDocument::new(
            BeamModel::continuous(&[20.0, 25.0, 20.0], 3.0e10).with_load(Load::point(1, 1.0e5, 12.5)),
        );

        save_model(&document, &path).unwrap();
        let loaded = load_model(&path).unwrap();
        assert_eq!(loaded, document);
        assert!(!tmp_path_for(&path).exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_model(Path::new("/nonexistent/girder/model.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_tmp_path() {
        assert_eq!(tmp_path_for(Path::new("/a/b/result.json")), Path::new("/a/b/result.json.tmp"));
    }
}
