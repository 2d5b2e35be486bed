// src/app/cache.rs
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Once, OnceLock};
use std::time::{Duration, SystemTime};

use image::{GenericImageView, ImageFormat};
use reqwest::blocking::Client;
use tracing::warn;

use crate::config::load_config;

// Chosen once on first call
static DATA_DIR_ONCE: OnceLock<PathBuf> = OnceLock::new();
static PORTRAIT_DIR_ONCE: OnceLock<PathBuf> = OnceLock::new();
static PORTRAIT_PRUNE_ONCE: Once = Once::new();

const PORTRAIT_RETENTION_DAYS: u64 = 30;
const PORTRAIT_RETENTION_SECS: u64 = PORTRAIT_RETENTION_DAYS * 24 * 60 * 60;
const PORTRAIT_MAX_W: u32 = 256;

/// App data dir: `data_dir` from config.json, else `.reelpick` next to the
/// binary. Holds the watchlist, UI prefs, and the portrait cache.
pub fn data_dir() -> PathBuf {
    DATA_DIR_ONCE
        .get_or_init(|| {
            let cfg = load_config();
            let mut path = PathBuf::from(cfg.data_dir.unwrap_or_else(|| ".reelpick".into()));
            if let Err(e) = fs::create_dir_all(&path) {
                warn!("failed to create data dir {}: {e}", path.display());
                path = PathBuf::from(".reelpick");
                let _ = fs::create_dir_all(&path);
            }
            path
        })
        .clone()
}

pub fn portrait_cache_dir() -> PathBuf {
    let dir = PORTRAIT_DIR_ONCE.get_or_init(|| {
        let mut path = data_dir().join("portraits");
        if let Err(e) = fs::create_dir_all(&path) {
            warn!("failed to create portrait cache dir {}: {e}", path.display());
            path = data_dir();
        }
        path
    });

    PORTRAIT_PRUNE_ONCE.call_once({
        let path = dir.clone();
        move || {
            if let Err(err) = prune_portrait_cache_in_dir(&path) {
                warn!("portrait cache prune failed: {err}");
            }
        }
    });

    dir.clone()
}

fn prune_portrait_cache_in_dir(dir: &Path) -> std::io::Result<usize> {
    let cutoff = SystemTime::now()
        .checked_sub(Duration::from_secs(PORTRAIT_RETENTION_SECS))
        .unwrap_or(SystemTime::UNIX_EPOCH);
    let mut removed = 0usize;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if matches!(ext.to_ascii_lowercase().as_str(), "png" | "jpg" | "jpeg" | "webp") => {}
            Some("part") => {
                // half-written leftover from an interrupted download
                let _ = fs::remove_file(&path);
                removed += 1;
                continue;
            }
            _ => continue,
        }
        let modified = entry.metadata()?.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        if modified < cutoff {
            let _ = fs::remove_file(&path);
            removed += 1;
        }
    }
    Ok(removed)
}

pub fn url_to_cache_key(url: &str) -> String {
    format!("{:x}", md5::compute(url.as_bytes()))
}

/// Decode any cached image file to (width, height, RGBA8 bytes).
pub fn load_rgba(path: &Path) -> Result<(u32, u32, Vec<u8>), String> {
    let img = image::ImageReader::open(path)
        .map_err(|e| format!("open image {}: {e}", path.display()))?
        .with_guessed_format()
        .map_err(|e| format!("guess format {}: {e}", path.display()))?
        .decode()
        .map_err(|e| format!("decode {}: {e}", path.display()))?;
    let (w, h) = img.dimensions();
    Ok((w, h, img.to_rgba8().to_vec()))
}

pub fn find_cached_portrait(key: &str) -> Option<PathBuf> {
    let dir = portrait_cache_dir();
    for ext in ["png", "jpg", "jpeg", "webp"] {
        let p = dir.join(format!("{key}.{ext}"));
        if p.exists() {
            return Some(p);
        }
    }
    None
}

/// Download a character portrait, downscale to at most `PORTRAIT_MAX_W` wide,
/// normalize to PNG, and store under the md5 key. Returns the stored path.
/// Reuses the caller's client for connection pooling.
pub fn download_and_store_portrait(
    client: &Client,
    url: &str,
    key: &str,
) -> Result<PathBuf, String> {
    let dest = portrait_cache_dir().join(format!("{key}.png"));
    if dest.exists() {
        return Ok(dest);
    }

    let bytes = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.bytes())
        .map_err(|e| format!("download portrait: {e}"))?;

    let img = image::load_from_memory(&bytes).map_err(|e| format!("decode portrait: {e}"))?;

    let (w, h) = img.dimensions();
    let out = if w > PORTRAIT_MAX_W {
        let new_h = ((h as f32) * (PORTRAIT_MAX_W as f32 / w as f32)).round().max(1.0) as u32;
        img.resize_exact(PORTRAIT_MAX_W, new_h, image::imageops::FilterType::CatmullRom)
    } else {
        img
    };

    let mut png_bytes: Vec<u8> = Vec::new();
    out.write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| format!("encode png: {e}"))?;

    if let Some(parent) = dest.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let tmp = dest.with_extension("png.part");
    {
        let mut f = fs::File::create(&tmp).map_err(|e| format!("create tmp: {e}"))?;
        f.write_all(&png_bytes).map_err(|e| format!("write: {e}"))?;
    }
    fs::rename(&tmp, &dest).map_err(|e| format!("rename: {e}"))?;

    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::url_to_cache_key;

    #[test]
    fn cache_key_is_stable_and_hexadecimal() {
        let a = url_to_cache_key("https://img.example/mickey.png");
        let b = url_to_cache_key("https://img.example/mickey.png");
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn different_urls_get_different_keys() {
        assert_ne!(
            url_to_cache_key("https://img.example/a.png"),
            url_to_cache_key("https://img.example/b.png"),
        );
    }
}
