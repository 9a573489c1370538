//! File-backed project persistence.
//!
//! DESIGN
//! ======
//! The project is written to a sibling `.tmp` file and then renamed over
//! the target, so a crash mid-write leaves the previous save intact. A
//! missing file means nothing was saved yet.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use planner::editor::{PersistError, Persistence};
use planner::project::Project;
use tracing::debug;

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Persistence for FileStore {
    fn autosave(&mut self, project: &Project) -> Result<(), PersistError> {
        let text = project.to_json_pretty()?;
        let tmp = self.temp_path();
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), items = project.items.len(), "project saved");
        Ok(())
    }

    fn load(&mut self) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
