//! JSON-file record store.
//!
//! The whole roster lives in memory as an ordered `Vec` and is mirrored to a
//! single pretty-printed JSON array:
//!
//! ```json
//! [
//!   {
//!     "name": "Aria",
//!     "characterClass": "Human",
//!     "health": 60,
//!     "attack": 15,
//!     "speed": 20
//!   }
//! ]
//! ```
//!
//! - Loading is soft: a missing, empty or damaged file yields an empty roster
//!   and a log line, never an error.
//! - Every successful mutation rewrites the whole file. A failed rewrite is
//!   logged and reported through [`SaveStatus`]; the in-memory change stays.
//! - Lookups are linear scans with case-insensitive name comparison.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::config::StorageConfig;
use crate::error::{Result, RosterError};
use crate::types::{names_match, CharacterClass, CharacterRecord, RecordKind, VariantKind};

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Whether the rewrite that follows a mutation reached the disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    /// The backing file now matches memory.
    Saved,
    /// The rewrite failed; memory holds the change, disk does not.
    Failed(String),
}

impl SaveStatus {
    /// `true` when the backing file was rewritten.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// A successful mutation together with the outcome of persisting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved<T> {
    /// The record as it is now (or as it was, for deletions).
    pub value: T,
    /// Result of the full-file rewrite.
    pub save: SaveStatus,
}

/// Outcome of a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// The record was removed.
    Deleted(Saved<CharacterRecord>),
    /// The request was not confirmed; nothing changed.
    Cancelled,
}

// ---------------------------------------------------------------------------
// RecordStore
// ---------------------------------------------------------------------------

/// Ordered, in-memory roster backed by a JSON file.
///
/// # Usage
///
/// ```no_run
/// # use roster_core::store::RecordStore;
/// # use roster_core::types::VariantKind;
/// let mut store = RecordStore::open("heroes.json", true);
/// let created = store.insert("Aria", 1, VariantKind::Hero, None)?;
/// assert!(created.save.is_saved());
/// assert_eq!(store.find_by_name("aria")?.stats.health, 60);
/// # Ok::<(), roster_core::error::RosterError>(())
/// ```
#[derive(Debug)]
pub struct RecordStore {
    records: Vec<CharacterRecord>,
    path: PathBuf,
    backup_corrupt: bool,
}

impl RecordStore {
    /// Create an empty store bound to `path` without reading it.
    #[must_use]
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            records: Vec::new(),
            path: path.as_ref().to_path_buf(),
            backup_corrupt: false,
        }
    }

    /// Open the store at `path`, loading whatever valid roster is there.
    ///
    /// A file that exists but cannot be parsed is copied to `<path>.bak`
    /// first when `backup_corrupt` is set.
    pub fn open<P: AsRef<Path>>(path: P, backup_corrupt: bool) -> Self {
        let mut store = Self::new(path);
        store.backup_corrupt = backup_corrupt;

        match Self::try_load(&store.path) {
            Ok(Some(records)) => {
                info!(
                    path = %store.path.display(),
                    records = records.len(),
                    "Roster loaded"
                );
                store.records = records;
            }
            Ok(None) => {
                info!(path = %store.path.display(), "No roster file yet, starting empty");
            }
            Err(e) => {
                warn!(
                    path = %store.path.display(),
                    error = %e,
                    "Could not load roster, starting empty"
                );
                if store.backup_corrupt {
                    store.backup_damaged_file();
                }
            }
        }
        store
    }

    /// Open the store described by `config`.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::open(&config.data_file, config.backup_corrupt)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Read the roster at `path`, treating every failure as "no prior data".
    pub fn load<P: AsRef<Path>>(path: P) -> Vec<CharacterRecord> {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(records) => records.unwrap_or_default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not load roster, starting empty");
                Vec::new()
            }
        }
    }

    /// Read the roster at `path`.
    ///
    /// Returns `Ok(None)` if the file does not exist and an empty roster if it
    /// holds only whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Io`] if the file cannot be read,
    /// [`RosterError::Serialization`] (or the offending validation error) if
    /// it is not a valid roster, and [`RosterError::DuplicateName`] if two
    /// records share a name.
    pub fn try_load<P: AsRef<Path>>(path: P) -> Result<Option<Vec<CharacterRecord>>> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            warn!(path = %path.display(), "Roster file is empty");
            return Ok(Some(Vec::new()));
        }

        let records: Vec<CharacterRecord> = serde_json::from_str(&content)?;

        for (i, record) in records.iter().enumerate() {
            if records[..i].iter().any(|earlier| earlier.is_named(&record.name)) {
                return Err(RosterError::DuplicateName {
                    name: record.name.clone(),
                });
            }
        }

        Ok(Some(records))
    }

    /// Rewrite the backing file with the full roster.
    ///
    /// The JSON is built before the file is touched, so an encoding failure
    /// leaves the old file in place.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Serialization`] if encoding fails or
    /// [`RosterError::Io`] if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let start = Instant::now();
        let mut json = serde_json::to_vec_pretty(&self.records)?;
        json.push(b'\n');

        let mut file = File::create(&self.path)?;
        file.write_all(&json)?;
        file.flush()?;

        debug!(
            path = %self.path.display(),
            records = self.records.len(),
            bytes = json.len(),
            elapsed_us = start.elapsed().as_micros(),
            "Saved roster"
        );
        Ok(())
    }

    /// Save and turn the outcome into a [`SaveStatus`], logging failures.
    fn persist(&self) -> SaveStatus {
        match self.save() {
            Ok(()) => SaveStatus::Saved,
            Err(e) => {
                error!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to save roster; changes are kept in memory only"
                );
                SaveStatus::Failed(e.to_string())
            }
        }
    }

    /// Path of the copy made of a damaged roster file (e.g. `heroes.json.bak`).
    #[must_use]
    pub fn backup_path(&self) -> PathBuf {
        let mut p = self.path.clone();
        let ext = match p.extension() {
            Some(e) => format!("{}.bak", e.to_string_lossy()),
            None => "bak".to_string(),
        };
        p.set_extension(ext);
        p
    }

    fn backup_damaged_file(&self) {
        let dest = self.backup_path();
        match std::fs::copy(&self.path, &dest) {
            Ok(_) => info!(backup = %dest.display(), "Damaged roster file backed up"),
            Err(e) => error!(
                backup = %dest.display(),
                error = %e,
                "Could not back up damaged roster file"
            ),
        }
    }

    // ------------------------------------------------------------------
    // Core CRUD
    // ------------------------------------------------------------------

    /// Check that `name` is usable for a new record and return it trimmed.
    ///
    /// # Errors
    ///
    /// [`RosterError::EmptyName`] if blank, [`RosterError::DuplicateName`] if
    /// any record already answers to it.
    pub fn check_name_available(&self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return reject("create", RosterError::EmptyName);
        }
        if self.records.iter().any(|r| r.is_named(name)) {
            return reject(
                "create",
                RosterError::DuplicateName {
                    name: name.to_string(),
                },
            );
        }
        Ok(name.to_string())
    }

    /// Create a record and append it to the roster.
    ///
    /// Validation order: name, class, reward. A reward given for a hero is
    /// ignored.
    ///
    /// # Errors
    ///
    /// [`RosterError::EmptyName`], [`RosterError::DuplicateName`],
    /// [`RosterError::InvalidClass`] or [`RosterError::InvalidReward`]. The
    /// roster is untouched on error.
    pub fn insert(
        &mut self,
        name: &str,
        class_selection: i64,
        variant: VariantKind,
        reward_value: Option<u32>,
    ) -> Result<Saved<CharacterRecord>> {
        let name = self.check_name_available(name)?;

        let Some(class) = CharacterClass::from_selection(class_selection) else {
            return reject(
                "create",
                RosterError::InvalidClass {
                    selection: class_selection,
                },
            );
        };

        let kind = match (variant, reward_value) {
            (VariantKind::Hero, _) => RecordKind::Hero,
            (VariantKind::Enemy, Some(reward_value)) if reward_value > 0 => {
                RecordKind::Enemy { reward_value }
            }
            (VariantKind::Enemy, _) => return reject("create", RosterError::InvalidReward),
        };

        let record = CharacterRecord::new(name, class, kind);
        self.records.push(record.clone());
        info!(
            name = %record.name,
            class = %record.class,
            variant = %record.kind.variant(),
            "Character created"
        );

        Ok(Saved {
            value: record,
            save: self.persist(),
        })
    }

    /// Look a record up by name (case-insensitive, first match wins).
    ///
    /// # Errors
    ///
    /// [`RosterError::NotFound`] if no record answers to `name`.
    pub fn find_by_name(&self, name: &str) -> Result<&CharacterRecord> {
        let record = self.resolve(name, "find")?;
        info!(name = %record.name, "Character looked up");
        Ok(record)
    }

    /// Resolve `name` to a record on behalf of `operation` (e.g. `"rename"`
    /// before asking for the new name). Unlike [`Self::find_by_name`] a hit
    /// is not logged as a query; a miss is logged under `operation`.
    ///
    /// # Errors
    ///
    /// [`RosterError::NotFound`] if no record answers to `name`.
    pub fn resolve(&self, name: &str, operation: &'static str) -> Result<&CharacterRecord> {
        match self.position(name) {
            Some(idx) => Ok(&self.records[idx]),
            None => reject(operation, not_found(name)),
        }
    }

    /// Rename the record answering to `current_name`.
    ///
    /// Changing only the casing of a record's own name is allowed.
    ///
    /// # Errors
    ///
    /// [`RosterError::NotFound`], [`RosterError::EmptyName`], or
    /// [`RosterError::DuplicateName`] when another record already uses
    /// `new_name`. Nothing changes on error.
    pub fn rename(&mut self, current_name: &str, new_name: &str) -> Result<Saved<CharacterRecord>> {
        let Some(idx) = self.position(current_name) else {
            return reject("rename", not_found(current_name));
        };

        let new_name = new_name.trim();
        if new_name.is_empty() {
            return reject("rename", RosterError::EmptyName);
        }
        let taken = self
            .records
            .iter()
            .enumerate()
            .any(|(i, r)| i != idx && r.is_named(new_name));
        if taken {
            return reject(
                "rename",
                RosterError::DuplicateName {
                    name: new_name.to_string(),
                },
            );
        }

        let record = &mut self.records[idx];
        let old_name = std::mem::replace(&mut record.name, new_name.to_string());
        let renamed = record.clone();
        info!(from = %old_name, to = %renamed.name, "Character renamed");

        Ok(Saved {
            value: renamed,
            save: self.persist(),
        })
    }

    /// Remove the record answering to `name` if `confirmed`.
    ///
    /// # Errors
    ///
    /// [`RosterError::NotFound`] if no record answers to `name`.
    pub fn delete(&mut self, name: &str, confirmed: bool) -> Result<Removal> {
        let Some(idx) = self.position(name) else {
            return reject("delete", not_found(name));
        };

        if !confirmed {
            info!(name = %self.records[idx].name, "Deletion cancelled");
            return Ok(Removal::Cancelled);
        }

        let removed = self.records.remove(idx);
        info!(name = %removed.name, "Character deleted");

        Ok(Removal::Deleted(Saved {
            value: removed,
            save: self.persist(),
        }))
    }

    // ------------------------------------------------------------------
    // Utility
    // ------------------------------------------------------------------

    /// All records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[CharacterRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.records.iter().position(|r| names_match(&r.name, name))
    }
}

fn not_found(name: &str) -> RosterError {
    RosterError::NotFound {
        name: name.trim().to_string(),
    }
}

/// Log a rejected request at WARN and return it as an error.
fn reject<T>(operation: &'static str, err: RosterError) -> Result<T> {
    warn!(operation, error = %err, "Request rejected");
    Err(err)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
