// src/app/prefs.rs
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use std::{fs, io};

use super::SampleCount;

impl crate::app::ReelpickApp {
    pub(crate) fn mark_dirty(&mut self) {
        self.prefs_dirty = true;
    }

    pub(crate) fn maybe_save_prefs(&mut self) {
        // debounce a bit to avoid writing every frame
        if self.prefs_dirty && self.prefs_last_write.elapsed() >= Duration::from_millis(300) {
            self.save_prefs();
            self.prefs_dirty = false;
            self.prefs_last_write = Instant::now();
        }
    }

    pub(crate) fn load_prefs(&mut self) {
        if let Some(n) = read_prefs(&prefs_path()).sample_count {
            self.sample_count = n;
        }
    }

    pub(crate) fn save_prefs(&self) {
        let _ = write_prefs(&prefs_path(), self.sample_count);
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct UiPrefs {
    pub sample_count: Option<SampleCount>,
}

/// Read key=value prefs; missing file, comments, blank or foreign lines all
/// fall through to defaults.
pub(crate) fn read_prefs(path: &Path) -> UiPrefs {
    let Ok(txt) = fs::read_to_string(path) else {
        return UiPrefs::default();
    };
    parse_prefs(&txt)
}

pub(crate) fn write_prefs(path: &Path, sample_count: SampleCount) -> io::Result<()> {
    fs::create_dir_all(path.parent().unwrap_or_else(|| Path::new(".")))?;
    fs::write(path, format_prefs(sample_count))
}

fn parse_prefs(txt: &str) -> UiPrefs {
    let mut prefs = UiPrefs::default();

    for line in txt.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        match k.trim() {
            "sample_count" => {
                if let Some(n) = SampleCount::from_str(v.trim()) {
                    prefs.sample_count = Some(n);
                }
            }
            _ => {}
        }
    }

    prefs
}

fn format_prefs(sample_count: SampleCount) -> String {
    format!(
        "# reelpick ui prefs\n\
         sample_count={}\n",
        sample_count.as_str(),
    )
}

pub fn prefs_path() -> PathBuf {
    crate::app::cache::data_dir().join("ui_prefs.txt")
}

#[cfg(test)]
mod tests {
    use super::{parse_prefs, read_prefs, write_prefs};
    use crate::app::SampleCount;

    #[test]
    fn prefs_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui_prefs.txt");

        write_prefs(&path, SampleCount::Five).unwrap();
        let prefs = read_prefs(&path);
        assert_eq!(prefs.sample_count, Some(SampleCount::Five));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = read_prefs(&dir.path().join("nope.txt"));
        assert_eq!(prefs.sample_count, None);
    }

    #[test]
    fn tolerates_comments_junk_and_unknown_keys() {
        let txt = "\
            # reelpick ui prefs\n\
            \n\
            not a key value line\n\
            day_range=7\n\
            sample_count=8\n\
            sample_count=oops\n";
        let prefs = parse_prefs(txt);
        assert_eq!(prefs.sample_count, Some(SampleCount::Eight));
    }

    #[test]
    fn unparseable_sample_count_is_ignored() {
        assert_eq!(parse_prefs("sample_count=42\n").sample_count, None);
    }
}
