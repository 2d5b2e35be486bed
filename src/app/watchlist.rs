// src/app/watchlist.rs
use std::path::{Path, PathBuf};
use std::{fs, io};

use tracing::warn;

/// Persisted list of movie titles, unique, in insertion order. Every mutation
/// writes the file back before returning, so disk always matches memory.
pub struct Watchlist {
    titles: Vec<String>,
    path: PathBuf,
}

impl Watchlist {
    /// Load from `path`. A missing file or one that fails to parse both start
    /// an empty watchlist; parse failures are logged, never surfaced.
    pub fn load(path: PathBuf) -> Self {
        let titles = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(list) => list,
                Err(e) => {
                    warn!("watchlist at {} unreadable ({e}); starting empty", path.display());
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self { titles, path }
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.titles.iter().any(|t| t == title)
    }

    /// Append if absent. A duplicate is a silent no-op (no error, no write).
    pub fn add(&mut self, title: &str) -> bool {
        if self.contains(title) {
            return false;
        }
        self.titles.push(title.to_string());
        self.persist();
        true
    }

    /// Remove every entry equal to `title`.
    pub fn remove(&mut self, title: &str) {
        self.titles.retain(|t| t != title);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.titles.clear();
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.write_to_disk() {
            warn!("failed to persist watchlist to {}: {e}", self.path.display());
        }
    }

    fn write_to_disk(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(&self.titles)?;
        let tmp = self.path.with_extension("json.part");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)
    }

    /// Copy the current file to a timestamped sibling.
    pub fn backup(&self) -> io::Result<PathBuf> {
        use chrono::Local;
        if !self.path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "no watchlist file to back up",
            ));
        }
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let dest = self
            .path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(format!("watchlist_backup_{stamp}.json"));
        fs::copy(&self.path, &dest)?;
        Ok(dest)
    }

    /// Restore the most recent backup, if any, and reload from it.
    pub fn restore_latest_backup(&mut self) -> io::Result<Option<PathBuf>> {
        let dir = self
            .path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut backups: Vec<(std::time::SystemTime, PathBuf)> = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            let is_backup = path
                .file_name()
                .and_then(|s| s.to_str())
                .map(|name| name.starts_with("watchlist_backup_") && name.ends_with(".json"))
                .unwrap_or(false);
            if is_backup && entry.file_type()?.is_file() {
                let modified = entry
                    .metadata()?
                    .modified()
                    .unwrap_or(std::time::SystemTime::UNIX_EPOCH);
                backups.push((modified, path));
            }
        }

        if backups.is_empty() {
            return Ok(None);
        }

        backups.sort_by_key(|(mtime, _)| *mtime);
        let latest = backups.pop().map(|(_, p)| p);
        if let Some(src) = &latest {
            fs::copy(src, &self.path)?;
            self.titles = Self::load(self.path.clone()).titles;
        }
        Ok(latest)
    }
}

pub fn watchlist_path() -> PathBuf {
    crate::app::cache::data_dir().join("watchlist.json")
}

#[cfg(test)]
mod tests {
    use super::Watchlist;
    use std::fs;

    fn scratch() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watchlist.json");
        (dir, path)
    }

    #[test]
    fn add_is_idempotent() {
        let (_dir, path) = scratch();
        let mut wl = Watchlist::load(path);
        assert!(wl.add("Frozen"));
        assert!(!wl.add("Frozen"));
        assert_eq!(wl.titles().len(), 1);
    }

    #[test]
    fn mutations_are_written_through() {
        let (_dir, path) = scratch();
        let mut wl = Watchlist::load(path.clone());
        wl.add("Moana");
        wl.add("Aladdin");

        let reloaded = Watchlist::load(path);
        assert_eq!(reloaded.titles(), wl.titles());
    }

    #[test]
    fn remove_of_absent_title_is_a_noop() {
        let (_dir, path) = scratch();
        let mut wl = Watchlist::load(path);
        wl.add("Moana");
        wl.remove("Tangled");
        assert_eq!(wl.titles(), ["Moana"]);
    }

    #[test]
    fn add_add_remove_leaves_empty_persisted_list() {
        let (_dir, path) = scratch();
        let mut wl = Watchlist::load(path.clone());
        wl.add("Frozen");
        wl.add("Frozen");
        wl.remove("Frozen");
        assert!(wl.is_empty());

        let reloaded = Watchlist::load(path);
        assert!(reloaded.is_empty());
    }

    #[test]
    fn clear_empties_and_persists() {
        let (_dir, path) = scratch();
        let mut wl = Watchlist::load(path.clone());
        wl.add("Moana");
        wl.add("Aladdin");
        wl.clear();
        assert!(wl.is_empty());
        assert!(Watchlist::load(path).is_empty());
    }

    #[test]
    fn clear_on_empty_list_is_harmless() {
        let (_dir, path) = scratch();
        let mut wl = Watchlist::load(path.clone());
        wl.clear();
        assert!(wl.is_empty());
        assert!(Watchlist::load(path).is_empty());
    }

    #[test]
    fn corrupt_file_loads_as_empty() {
        let (_dir, path) = scratch();
        fs::write(&path, "{{{not json").unwrap();
        let wl = Watchlist::load(path);
        assert!(wl.is_empty());
    }

    #[test]
    fn backup_and_restore_round_trip() {
        let (_dir, path) = scratch();
        let mut wl = Watchlist::load(path.clone());
        wl.add("Frozen");
        let backup = wl.backup().unwrap();
        assert!(backup.exists());

        wl.clear();
        assert!(wl.is_empty());

        let restored = wl.restore_latest_backup().unwrap();
        assert_eq!(restored, Some(backup));
        assert_eq!(wl.titles(), ["Frozen"]);
    }
}
