//! Session file store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::name::SessionName;
use crate::Result;

/// Subdirectory of the storage root holding the session files
pub const SESSIONS_DIR: &str = "sessions";
pub const SESSION_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "json.tmp";

/// A named, ordered list of file paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub name: SessionName,
    /// Absolute paths in the order the documents were open. Not deduplicated.
    pub files: Vec<String>,
}

impl Session {
    pub fn new(name: SessionName, files: Vec<String>) -> Self {
        Self { name, files }
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Listing entry with the metadata a picker might sort by
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub name: SessionName,
    /// `None` when the file could not be parsed
    pub file_count: Option<usize>,
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Create a store rooted at `<storage_root>/sessions`. Nothing touches
    /// the disk until the first save.
    pub fn new(storage_root: impl AsRef<Path>) -> Self {
        Self {
            dir: storage_root.as_ref().join(SESSIONS_DIR),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, name: &SessionName) -> PathBuf {
        self.dir.join(name.file_name())
    }

    pub fn has_sessions_dir(&self) -> bool {
        self.dir.is_dir()
    }

    pub fn exists(&self, name: &SessionName) -> bool {
        self.path_of(name).is_file()
    }

    /// Persist `files` under `name`, silently replacing any existing session
    pub fn save(&self, name: &SessionName, files: &[String]) -> Result<Session> {
        self.write_session(name, files)?;

        tracing::info!(
            session = %name,
            file_count = files.len(),
            "Saved session"
        );

        Ok(Session::new(name.clone(), files.to_vec()))
    }

    /// Replace the file list of an existing session. The store does not
    /// require the session to exist; callers confirm that with the user.
    pub fn overwrite(&self, name: &SessionName, files: &[String]) -> Result<Session> {
        let existed = self.exists(name);
        self.write_session(name, files)?;

        tracing::info!(
            session = %name,
            file_count = files.len(),
            existed,
            "Overwrote session"
        );

        Ok(Session::new(name.clone(), files.to_vec()))
    }

    /// Names of all sessions in directory enumeration order.
    /// A missing sessions directory is an empty store.
    pub fn list(&self) -> Result<Vec<SessionName>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::io(&self.dir, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io(&self.dir, e))?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            if path.extension().and_then(|e| e.to_str()) != Some(SESSION_EXTENSION) {
                continue;
            }

            match SessionName::from_file_name(file_name) {
                // Names are trimmed, so " x.json" would list a session that
                // no other operation can reach
                Ok(name) if name.file_name() != file_name => {
                    tracing::debug!(file = %file_name, "Skipping session file with padded name");
                }
                Ok(name) => names.push(name),
                Err(e) => {
                    tracing::debug!(file = %file_name, error = %e, "Skipping session file");
                }
            }
        }

        Ok(names)
    }

    /// Same as [`list`](Self::list), ordered alphabetically
    pub fn list_sorted(&self) -> Result<Vec<SessionName>> {
        let mut names = self.list()?;
        names.sort();
        Ok(names)
    }

    pub fn load(&self, name: &SessionName) -> Result<Vec<String>> {
        let path = self.path_of(name);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => return Err(StorageError::io(path, e)),
        };

        let files: Vec<String> =
            serde_json::from_str(&content).map_err(|source| StorageError::Parse {
                name: name.to_string(),
                source,
            })?;

        tracing::debug!(session = %name, file_count = files.len(), "Loaded session");

        Ok(files)
    }

    pub fn load_session(&self, name: &SessionName) -> Result<Session> {
        let files = self.load(name)?;
        Ok(Session::new(name.clone(), files))
    }

    /// Remove a session file. Returns whether anything was deleted; an
    /// absent session is not an error.
    pub fn delete(&self, name: &SessionName) -> Result<bool> {
        let path = self.path_of(name);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(session = %name, "Deleted session");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(session = %name, "Delete of missing session ignored");
                Ok(false)
            }
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    pub fn summaries(&self) -> Result<Vec<SessionSummary>> {
        let summaries = self
            .list()?
            .into_iter()
            .map(|name| {
                let path = self.path_of(&name);
                let modified_at = fs::metadata(&path)
                    .and_then(|m| m.modified())
                    .ok()
                    .map(DateTime::<Utc>::from);
                let file_count = self.load(&name).ok().map(|files| files.len());

                SessionSummary {
                    name,
                    file_count,
                    modified_at,
                }
            })
            .collect();

        Ok(summaries)
    }

    fn write_session(&self, name: &SessionName, files: &[String]) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;

        let content = serde_json::to_string_pretty(files)?;
        write_atomic(&self.path_of(name), &content)
    }
}

/// Whole-file write through a sibling temp file, so readers never observe a
/// truncated session
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let tmp_path = path.with_extension(TEMP_EXTENSION);

    fs::write(&tmp_path, content).map_err(|e| StorageError::io(&tmp_path, e))?;

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StorageError::io(path, e));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn name(s: &str) -> SessionName {
        SessionName::new(s).unwrap()
    }

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_save_load_overwrite_delete() {
        let root = tempdir().unwrap();
        let store = SessionStore::new(root.path());
        let alpha = name("alpha");

        assert!(!store.has_sessions_dir());

        let saved = store.save(&alpha, &paths(&["/a.ts", "/b.ts"])).unwrap();
        assert_eq!(saved.file_count(), 2);
        assert!(store.has_sessions_dir());

        let raw = fs::read_to_string(root.path().join("sessions/alpha.json")).unwrap();
        let on_disk: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(on_disk, vec!["/a.ts", "/b.ts"]);

        assert_eq!(store.load(&alpha).unwrap(), vec!["/a.ts", "/b.ts"]);

        store.overwrite(&alpha, &paths(&["/c.ts"])).unwrap();
        assert_eq!(store.load(&alpha).unwrap(), vec!["/c.ts"]);

        assert!(store.delete(&alpha).unwrap());
        assert!(!store.list().unwrap().contains(&alpha));
        assert!(!store.delete(&alpha).unwrap());
    }

    #[test]
    fn test_round_trip_keeps_order_and_duplicates() {
        let root = tempdir().unwrap();
        let store = SessionStore::new(root.path());
        let files = paths(&["/z/last.rs", "/a/first.rs", "/z/last.rs", "/dir with space/ü.md"]);

        store.save(&name("work"), &files).unwrap();
        assert_eq!(store.load(&name("work")).unwrap(), files);
    }

    #[test]
    fn test_save_replaces_instead_of_merging() {
        let root = tempdir().unwrap();
        let store = SessionStore::new(root.path());

        store.save(&name("s"), &paths(&["/one", "/two"])).unwrap();
        store.save(&name("s"), &paths(&["/three"])).unwrap();

        assert_eq!(store.load(&name("s")).unwrap(), vec!["/three"]);
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let root = tempdir().unwrap();
        let store = SessionStore::new(root.path().join("never-created"));

        assert!(store.list().unwrap().is_empty());
        assert!(store.summaries().unwrap().is_empty());
    }

    #[test]
    fn test_list_ignores_other_entries() {
        let root = tempdir().unwrap();
        let store = SessionStore::new(root.path());

        store.save(&name("b"), &paths(&["/x"])).unwrap();
        store.save(&name("a"), &paths(&["/y"])).unwrap();
        fs::write(store.dir().join("notes.txt"), "hi").unwrap();
        fs::write(store.dir().join("half.json.tmp"), "[").unwrap();
        fs::create_dir(store.dir().join("folder.json")).unwrap();

        let mut listed = store.list().unwrap();
        listed.sort();
        assert_eq!(listed, vec![name("a"), name("b")]);
        assert_eq!(store.list_sorted().unwrap(), vec![name("a"), name("b")]);
    }

    #[test]
    fn test_list_skips_padded_file_names() {
        let root = tempdir().unwrap();
        let store = SessionStore::new(root.path());

        store.save(&name("x"), &paths(&["/x"])).unwrap();
        fs::write(store.dir().join(" y.json"), "[\"/y\"]").unwrap();
        fs::write(store.dir().join("z .json"), "[\"/z\"]").unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed, vec![name("x")]);
        for session in &listed {
            assert!(store.load(session).is_ok());
        }
        assert_eq!(store.summaries().unwrap().len(), 1);
    }

    #[test]
    fn test_load_missing_and_corrupt() {
        let root = tempdir().unwrap();
        let store = SessionStore::new(root.path());

        assert!(matches!(
            store.load(&name("ghost")),
            Err(StorageError::NotFound(n)) if n == "ghost"
        ));

        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.path_of(&name("broken")), "{\"not\": \"an array\"}").unwrap();
        fs::write(store.path_of(&name("numbers")), "[1, 2]").unwrap();

        assert!(matches!(
            store.load(&name("broken")),
            Err(StorageError::Parse { .. })
        ));
        assert!(matches!(
            store.load(&name("numbers")),
            Err(StorageError::Parse { .. })
        ));
    }

    #[test]
    fn test_summaries_report_unparseable_sessions() {
        let root = tempdir().unwrap();
        let store = SessionStore::new(root.path());

        store.save(&name("good"), &paths(&["/a", "/b", "/c"])).unwrap();
        fs::write(store.path_of(&name("bad")), "nope").unwrap();

        let mut summaries = store.summaries().unwrap();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(summaries[0].name, name("bad"));
        assert_eq!(summaries[0].file_count, None);
        assert_eq!(summaries[1].file_count, Some(3));
        assert!(summaries[1].modified_at.is_some());
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let root = tempdir().unwrap();
        let store = SessionStore::new(root.path());

        store.save(&name("clean"), &paths(&["/a"])).unwrap();

        let leftovers: Vec<_> = fs::read_dir(store.dir())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
