use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::JoinHandle;

use serde::{Deserialize, Serialize};

use super::PathCache;
use crate::error::CacheError;

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    #[serde(default)]
    paths: BTreeMap<String, String>,
}

/// TOML-file-backed cache.
///
/// Reads the file once on open. Writes update the in-memory map immediately
/// and hand a snapshot to a writer thread, which keeps only the newest pending
/// snapshot and rewrites the file.
pub struct TomlFileCache {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
    write_tx: Option<Sender<BTreeMap<String, String>>>,
    writer: Option<JoinHandle<()>>,
}

impl TomlFileCache {
    /// Open the cache at `path`. A missing file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();
        let entries = load_entries(&path)?;

        let (write_tx, write_rx) = std::sync::mpsc::channel();
        let writer_path = path.clone();
        let writer = std::thread::spawn(move || writer_loop(writer_path, write_rx));

        Ok(Self {
            path,
            entries: Mutex::new(entries),
            write_tx: Some(write_tx),
            writer: Some(writer),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PathCache for TomlFileCache {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        let snapshot = match self.entries.lock() {
            Ok(mut entries) => {
                if entries.get(key).map(String::as_str) == Some(value) {
                    return;
                }
                entries.insert(key.to_string(), value.to_string());
                entries.clone()
            }
            Err(_) => return,
        };

        if let Some(ref tx) = self.write_tx
            && tx.send(snapshot).is_err()
        {
            log::warn!("Path cache writer is gone, dropping write for {}", key);
        }
    }
}

impl Drop for TomlFileCache {
    fn drop(&mut self) {
        // Closing the channel lets the writer flush what it has and exit
        self.write_tx.take();
        if let Some(writer) = self.writer.take()
            && writer.join().is_err()
        {
            log::warn!("Path cache writer panicked");
        }
    }
}

fn load_entries(path: &Path) -> Result<BTreeMap<String, String>, CacheError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(parse_cache_toml(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(e) => Err(e.into()),
    }
}

fn parse_cache_toml(content: &str) -> Result<BTreeMap<String, String>, toml::de::Error> {
    toml::from_str::<CacheFile>(content).map(|file| file.paths)
}

fn writer_loop(path: PathBuf, write_rx: Receiver<BTreeMap<String, String>>) {
    while let Ok(mut snapshot) = write_rx.recv() {
        // Coalesce a burst of keystrokes into one write
        while let Ok(newer) = write_rx.try_recv() {
            snapshot = newer;
        }

        if let Err(e) = write_entries(&path, snapshot) {
            log::warn!("Failed to write path cache {}: {}", path.display(), e);
        }
    }

    log::debug!("Path cache writer shutting down");
}

fn write_entries(path: &Path, paths: BTreeMap<String, String>) -> Result<(), CacheError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string(&CacheFile { paths })?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
#[path = "file_cache_tests.rs"]
mod file_cache_tests;
