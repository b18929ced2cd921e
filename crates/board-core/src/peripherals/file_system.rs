//! Flat text file store backing the board's persistent storage API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named text files, kept for the lifetime of the runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSystemState {
    files: BTreeMap<String, String>,
}

impl FileSystemState {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            files: BTreeMap::new(),
        }
    }

    /// Appends to `name`, creating it when missing.
    pub fn append(&mut self, name: &str, content: &str) {
        self.files
            .entry(name.to_owned())
            .or_default()
            .push_str(content);
    }

    /// Contents of `name`.
    #[must_use]
    pub fn read(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    /// Deletes `name`, returning whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.files.remove(name).is_some()
    }

    /// File names in sorted order.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}
