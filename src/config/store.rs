//! Persisted `KEY=VALUE` store
//!
//! The store is a flat text file with one assignment per line. Values are the
//! literal text after the first `=`; there are no quoting or escaping rules.
//! Reads and writes agree on the line format so a value written here is the
//! value returned by the next load.

use crate::domain::{PhenomlError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default store file name
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Handle on a store file
///
/// # Example
///
/// ```no_run
/// use phenoml_workflow::config::EnvStore;
///
/// # fn example() -> phenoml_workflow::domain::Result<()> {
/// let store = EnvStore::new(".env");
/// store.write("FHIR_PROVIDER_ID", "abc123")?;
/// let snapshot = store.load()?;
/// assert_eq!(snapshot.get("FHIR_PROVIDER_ID"), Some("abc123"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EnvStore {
    path: PathBuf,
}

impl EnvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the store into memory
    ///
    /// A missing file is an empty store. Any other I/O failure is a
    /// persistence error.
    pub fn load(&self) -> Result<StoreSnapshot> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let snapshot = StoreSnapshot::parse(&contents);
                tracing::debug!(
                    path = %self.path.display(),
                    entries = snapshot.len(),
                    "Loaded configuration store"
                );
                Ok(snapshot)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Configuration store not found");
                Ok(StoreSnapshot::default())
            }
            Err(e) => Err(PhenomlError::persistence(&self.path, e)),
        }
    }

    /// Set `key` to `value`, preserving every other line
    ///
    /// The first line starting with `key=` is rewritten in place. Otherwise a
    /// new line is appended, after terminating the previous last line if it
    /// lacked a newline. A missing file is created with the single line.
    pub fn write(&self, key: &str, value: &str) -> Result<()> {
        validate_assignment(key, value)?;

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(PhenomlError::persistence(&self.path, e)),
        };

        let (updated, replaced) = upsert_line(&contents, key, value);
        fs::write(&self.path, updated).map_err(|e| PhenomlError::persistence(&self.path, e))?;

        tracing::info!(
            path = %self.path.display(),
            key = key,
            replaced = replaced,
            "Saved configuration value"
        );
        Ok(())
    }
}

/// Rewrite `contents` so that `key` maps to `value`
///
/// Returns the new contents and whether an existing line was replaced.
pub fn upsert_line(contents: &str, key: &str, value: &str) -> (String, bool) {
    let prefix = format!("{key}=");
    let assignment = format!("{key}={value}\n");
    let mut out = String::with_capacity(contents.len() + assignment.len() + 1);
    let mut replaced = false;

    for line in contents.split_inclusive('\n') {
        if !replaced && line.starts_with(&prefix) {
            out.push_str(&assignment);
            replaced = true;
        } else {
            out.push_str(line);
        }
    }

    if !replaced {
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&assignment);
    }

    (out, replaced)
}

fn validate_assignment(key: &str, value: &str) -> Result<()> {
    if key.is_empty() {
        return Err(PhenomlError::validation("key", "key name cannot be empty"));
    }
    if !is_valid_key(key) {
        return Err(PhenomlError::validation(
            "key",
            format!("{key:?} must be letters, digits and '_', not starting with a digit"),
        ));
    }
    if value.contains('\n') || value.contains('\r') {
        return Err(PhenomlError::validation(
            key,
            "value cannot contain line breaks",
        ));
    }
    Ok(())
}

/// Whether `key` is a name the reader will load back: `[A-Za-z_][A-Za-z0-9_]*`
fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// In-memory view of a store file
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    entries: Vec<(String, String)>,
}

impl StoreSnapshot {
    /// Parse store contents
    ///
    /// Blank lines, `#` comments and lines without `=` are skipped. When a key
    /// appears more than once the first line wins, matching the line
    /// [`EnvStore::write`] rewrites.
    pub fn parse(contents: &str) -> Self {
        let entries = contents
            .lines()
            .filter_map(|line| {
                let line = line.strip_suffix('\r').unwrap_or(line);
                if line.trim_start().starts_with('#') {
                    return None;
                }
                let (key, value) = line.split_once('=')?;
                if key.is_empty() {
                    return None;
                }
                Some((key.to_string(), value.to_string()))
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of assignment lines, duplicates included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of lines assigning `key`
    pub fn occurrences(&self, key: &str) -> usize {
        self.entries.iter().filter(|(k, _)| k == key).count()
    }

}
