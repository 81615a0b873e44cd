use regex::Regex;
use std::fs;
use std::path::Path;

use crate::backup::{timestamp_of, DIRECTORY_SIGNATURE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupEntry {
    pub key: usize,
    pub name: String,
    pub timestamp: i64,
}

/// 1-based numbering of the backups found by one scan.
#[derive(Debug, Default)]
pub struct BackupIndex {
    entries: Vec<BackupEntry>,
}

impl BackupIndex {
    pub fn entries(&self) -> &[BackupEntry] {
        &self.entries
    }

    pub fn get(&self, key: usize) -> Option<&BackupEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Finds directories in `dir` whose name contains the backup signature.
///
/// The match is a plain substring match, so a directory such as
/// `old_hydrogenbackup_copy` is picked up too and fails the timestamp parse.
pub fn scan(dir: &Path) -> Result<BackupIndex, String> {
    let signature = Regex::new(&regex::escape(DIRECTORY_SIGNATURE))
        .map_err(|e| format!("There is a problem with the signature pattern: {}", e))?;

    let mut names = Vec::new();
    let entries = fs::read_dir(dir).map_err(|e| format!("Failed to read {}: {}", dir.display(), e))?;
    for entry in entries {
        let entry = entry.map_err(|e| format!("Failed to read entry in {}: {}", dir.display(), e))?;
        let is_dir = entry.file_type().map_or(false, |ft| ft.is_dir());
        if !is_dir {
            continue;
        }
        // The name is handed to arangorestore as-is, so it has to be valid UTF-8.
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if signature.is_match(&name) {
            names.push(name);
        }
    }
    names.sort();

    let entries = names
        .into_iter()
        .enumerate()
        .map(|(i, name)| -> Result<BackupEntry, String> {
            let timestamp = timestamp_of(&name)?;
            Ok(BackupEntry { key: i + 1, name, timestamp })
        })
        .collect::<Result<Vec<_>, String>>()?;

    Ok(BackupIndex { entries })
}
