// src/app/types.rs
use std::path::PathBuf;

use eframe::egui::TextureHandle;
use serde::Deserialize;

// ---- remote data model ----

/// One character record as served by the Disney API. Every list field may be
/// absent on the wire; we treat absent as empty.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub tv_shows: Vec<String>,
    #[serde(default)]
    pub short_films: Vec<String>,
    #[serde(default)]
    pub park_attractions: Vec<String>,
}

/// Derived aggregate keyed by film title. `character_idxs` index into the
/// session's character cache, in first-seen order; the three auxiliary lists
/// are deduplicated and sorted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Movie {
    pub title: String,
    pub character_idxs: Vec<usize>,
    pub tv_shows: Vec<String>,
    pub short_films: Vec<String>,
    pub park_attractions: Vec<String>,
}

// ---- cross-thread messages ----

pub enum FetchMsg {
    Done(Vec<Character>),
    Error(String),
}

// ---- portrait cache states ----

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortraitState {
    Pending, // queued or downloading
    Cached,  // file present on disk (ready to upload)
    Ready,   // texture uploaded
    Failed,  // permanent failure
}

pub struct Portrait {
    pub url: String,
    pub path: Option<PathBuf>,
    pub tex: Option<TextureHandle>, // UI thread only
    pub state: PortraitState,
}

// ---- UI controls ----

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleCount {
    Three,
    Five,
    Eight,
}

impl SampleCount {
    pub const fn count(self) -> usize {
        match self {
            Self::Three => 3,
            Self::Five => 5,
            Self::Eight => 8,
        }
    }
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Three => "3",
            Self::Five => "5",
            Self::Eight => "8",
        }
    }
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "3" => Some(Self::Three),
            "5" => Some(Self::Five),
            "8" => Some(Self::Eight),
            _ => None,
        }
    }
    /// Nearest selector for a configured default sample size.
    pub const fn from_count(n: usize) -> Self {
        match n {
            0..=3 => Self::Three,
            4..=5 => Self::Five,
            _ => Self::Eight,
        }
    }
}
