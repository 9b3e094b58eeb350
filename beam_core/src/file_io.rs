//! # File I/O Module
//!
//! Handles beam definition files with safety features:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility
//!
//! ## File Format
//!
//! Definitions are stored as pretty-printed JSON, one beam per file, named
//! `<beam name>.json` inside a beams directory.
//!
//! ## Example
//!
//! ```rust,no_run
//! use beam_core::definition::BeamDefinition;
//! use beam_core::file_io::{definition_path, load_definition, save_definition};
//! use beam_core::materials::PrintOverrides;
//! use std::path::Path;
//!
//! let def = BeamDefinition::new("bracket", PrintOverrides::default());
//! let path = definition_path(Path::new("beams"), &def.name)?;
//!
//! save_definition(&def, &path)?;
//! let loaded = load_definition(&path)?;
//! assert_eq!(loaded.name, "bracket");
//! # Ok::<(), beam_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::definition::BeamDefinition;
use crate::errors::{CalcError, CalcResult};

/// File extension for definition files
pub const DEFINITION_EXTENSION: &str = "json";

/// Path of the definition file for `name` inside `dir`.
///
/// The trimmed name becomes the file stem, so it must be a single plain
/// path component: not empty, no `/` or `\`, and not `.` or `..`.
pub fn definition_path(dir: &Path, name: &str) -> CalcResult<PathBuf> {
    let stem = name.trim();
    if stem.is_empty() {
        return Err(CalcError::invalid_input("beam_name", name, "Beam name is empty"));
    }
    if stem.contains(['/', '\\']) || stem == "." || stem == ".." {
        return Err(CalcError::invalid_input(
            "beam_name",
            name,
            "Beam name must be a plain file name without path separators",
        ));
    }
    Ok(dir.join(format!("{}.{}", stem, DEFINITION_EXTENSION)))
}

/// Save a definition using atomic write (temp file + rename).
///
/// Parent directories are created if missing.
pub fn save_definition(definition: &BeamDefinition, path: &Path) -> CalcResult<()> {
    let json = definition.to_json()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error("create directory", parent, e))?;
    }

    write_atomic(path, json.as_bytes())
}

/// Write `bytes` to a sibling `.tmp` file, sync it, then rename over `path`.
/// A failed rename removes the temp file.
fn write_atomic(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    let tmp_path = path.with_extension(format!("{}.tmp", DEFINITION_EXTENSION));

    let written = File::create(&tmp_path)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .map_err(|e| io_error("write temp file", &tmp_path, e));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        io_error("rename to final", path, e)
    })
}

/// Load a definition from a file.
///
/// # Returns
///
/// * `Ok(BeamDefinition)` - Successfully loaded definition
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
///
/// A file without a `name` takes its name from the file stem.
pub fn load_definition(path: &Path) -> CalcResult<BeamDefinition> {
    let contents = fs::read_to_string(path).map_err(|e| io_error("read", path, e))?;

    let mut definition = BeamDefinition::from_json(&contents).map_err(|e| match e {
        CalcError::SerializationError { reason } => CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), reason),
        },
        other => other,
    })?;

    if definition.name.is_empty() {
        if let Some(stem) = path.file_stem() {
            definition.name = stem.to_string_lossy().into_owned();
        }
    }

    Ok(definition)
}

fn io_error(operation: &str, path: &Path, e: std::io::Error) -> CalcError {
    CalcError::file_error(operation, path.display().to_string(), e.to_string())
}
