//! Durable records carried between verification attempts: the
//! known-commits map for each level, and the "last commit name" marker.
//! Both are small JSON/text files under one directory.

use crate::names::NameMap;
use failure::Fallible;
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// On-disk store for level progress records.
#[derive(Debug)]
pub struct LevelStore {
    dir: PathBuf,
}

impl LevelStore {
    pub fn new(dir: &Path) -> LevelStore {
        LevelStore {
            dir: dir.to_path_buf(),
        }
    }

    fn known_path(&self, level: &str) -> PathBuf {
        self.dir.join(format!("{}.known.json", level))
    }

    /// The known-commits map for a level; an absent record is an empty map.
    pub fn known_commits(&self, level: &str) -> Fallible<NameMap> {
        match fs::read(self.known_path(level)) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(ref e) if e.kind() == ErrorKind::NotFound => Ok(NameMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn write_known_commits(&self, level: &str, names: &NameMap) -> Fallible<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.known_path(level), serde_json::to_vec(names)?)?;
        debug!("wrote known commits for {}", level);
        Ok(())
    }

    /// Forget a level's known commits, as a fresh setup does.
    pub fn clear_known_commits(&self, level: &str) -> Fallible<()> {
        match fs::remove_file(self.known_path(level)) {
            Ok(()) => Ok(()),
            Err(ref e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// The most recently created numbered commit, if recorded.
    pub fn last_commit(&self) -> Fallible<Option<String>> {
        match fs::read_to_string(self.dir.join("last_commit")) {
            Ok(name) => Ok(Some(name.trim().to_string())),
            Err(ref e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn write_last_commit(&self, name: &str) -> Fallible<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join("last_commit"), name)?;
        Ok(())
    }
}
