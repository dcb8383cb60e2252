//! Lookup of meeting records by identifier.
//!
//! Stores are handed to the renderer's callers explicitly; nothing here is a
//! process-wide singleton.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::Error;
use crate::model::MeetingRecord;

pub trait MeetingStore: Send + Sync {
    /// `Ok(None)` when no record has this id.
    fn find(&self, id: &str) -> Result<Option<MeetingRecord>, Error>;
}

/// Ids the directory store is willing to turn into a file name.
fn is_file_safe_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 128
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// One `<id>.json` file per record under a root directory. Files are read
/// on every lookup, so edits are picked up without a restart.
#[derive(Clone, Debug)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl MeetingStore for DirectoryStore {
    fn find(&self, id: &str) -> Result<Option<MeetingRecord>, Error> {
        if !is_file_safe_id(id) {
            return Ok(None);
        }
        let path = self.root.join(format!("{id}.json"));
        let bytes = match std::fs::read(&path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::Io(std::io::Error::new(
                    e.kind(),
                    format!("{}: {}", e, path.display()),
                )));
            }
        };
        let record = MeetingRecord::from_json(&bytes)
            .map_err(|e| Error::InvalidRecord(format!("{}: {e}", path.display())))?;
        log::debug!("loaded meeting {id} from {}", path.display());
        Ok(Some(record))
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, MeetingRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, record: MeetingRecord) {
        self.records.insert(id.into(), record);
    }
}

impl MeetingStore for MemoryStore {
    fn find(&self, id: &str) -> Result<Option<MeetingRecord>, Error> {
        Ok(self.records.get(id).cloned())
    }
}
