//! File-backed store: `<dir>/<key>.json`

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::KvStore;
use crate::error::{Error, Result};

/// Stores each key as a JSON file in a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` for storage, creating it if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| Error::Io {
            context: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are fixed identifiers; strip anything that could escape the dir
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl KvStore for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        // Write-then-rename: readers see the old value or the new one
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .and_then(|_| fs::rename(&tmp, &path))
            .map_err(|source| Error::Io {
                context: path.display().to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("neon-blaster-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = temp_dir("roundtrip");
        let mut store = FileStore::open(&dir).unwrap();
        assert!(store.read("scores").is_none());

        store.write("scores", "[1,2,3]").unwrap();
        assert_eq!(store.read("scores").as_deref(), Some("[1,2,3]"));

        // A second handle on the same dir sees the value
        let other = FileStore::open(&dir).unwrap();
        assert_eq!(other.read("scores").as_deref(), Some("[1,2,3]"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_keys_cannot_escape_dir() {
        let dir = temp_dir("escape");
        let store = FileStore::open(&dir).unwrap();
        let path = store.path_for("../evil");
        assert_eq!(path.parent(), Some(dir.as_path()));
        let _ = fs::remove_dir_all(&dir);
    }
}
