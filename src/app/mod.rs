// src/app/mod.rs — one fetch per run, cached aggregation, random sampling,
// write-through watchlist

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::{Duration, Instant};

use eframe::egui as eg;
use itertools::Itertools;
use tracing::{info, warn};

pub mod api;
pub mod cache;
pub mod gfx;
pub mod movies;
pub mod prefetch;
pub mod prefs;
pub mod sample;
pub mod types;
pub mod ui;
pub mod watchlist;

use crate::config::{load_config, AppConfig};
use prefetch::{PortraitFetcher, PortraitJob};
pub use types::{Character, FetchMsg, Movie, Portrait, PortraitState, SampleCount};
use watchlist::{watchlist_path, Watchlist};

// ---- Tunables ----
const MAX_UPLOADS_PER_FRAME: usize = 4;
const MAX_DONE_PER_FRAME: usize = 12;
const CAST_PER_CARD: usize = 4;
const TOAST_DURATION: Duration = Duration::from_secs(3);
pub(crate) const SCROLL_TOP_THRESHOLD: f32 = 200.0;
pub(crate) const FOOTER_BOTTOM_SLACK: f32 = 50.0;
pub(crate) const LOAD_ERROR_MSG: &str = "Error loading movies.";

pub(crate) struct Toast {
    pub text: String,
    pub shown_at: Instant,
}

/// Everything a card needs for one frame, detached from the caches so the UI
/// pass can mutate the app freely.
pub(crate) struct CardView {
    pub title: String,
    pub cast: Vec<(String, String)>, // (name, portrait cache key)
    pub tv_shows: String,
    pub short_films: String,
    pub park_attractions: String,
}

pub struct ReelpickApp {
    cfg: AppConfig,

    // session caches, each filled at most once per run
    characters: Option<Vec<Character>>,
    movies: Option<Vec<Movie>>,
    displayed: Vec<usize>, // indices into the movie cache
    load_error: Option<String>,

    // fetch plumbing (Some while a fetch is in flight)
    fetch_rx: Option<Receiver<FetchMsg>>,

    // sampling control
    sample_count: SampleCount,

    // watchlist
    watchlist: Watchlist,

    // portraits
    portraits: HashMap<String, Portrait>,
    fetcher: Option<PortraitFetcher>,

    // toast
    toast: Option<Toast>,

    // scroll affordance
    scroll_offset: f32,
    at_bottom: bool,
    scroll_to_top: bool,

    // prefs
    prefs_dirty: bool,
    prefs_last_write: Instant,

    did_init: bool,
}

impl Default for ReelpickApp {
    fn default() -> Self {
        let cfg = load_config();
        let sample_count = SampleCount::from_count(cfg.sample_size);
        let watchlist = Watchlist::load(watchlist_path());

        Self {
            cfg,
            characters: None,
            movies: None,
            displayed: Vec::new(),
            load_error: None,
            fetch_rx: None,
            sample_count,
            watchlist,
            portraits: HashMap::new(),
            fetcher: None,
            toast: None,
            scroll_offset: 0.0,
            at_bottom: false,
            scroll_to_top: false,
            prefs_dirty: false,
            prefs_last_write: Instant::now(),
            did_init: false,
        }
    }
}

impl ReelpickApp {
    pub(crate) fn fetch_in_flight(&self) -> bool {
        self.fetch_rx.is_some()
    }

    /// Show a transient message; re-invoking restarts the 3s timer.
    pub(crate) fn notify(&mut self, text: impl Into<String>) {
        self.toast = Some(Toast {
            text: text.into(),
            shown_at: Instant::now(),
        });
    }

    /// "Generate Movies": resample from the movie cache, fetching the
    /// character page first if this run hasn't yet.
    pub(crate) fn request_generate(&mut self) {
        if self.movies.is_some() {
            self.resample();
            return;
        }
        if self.fetch_in_flight() {
            return;
        }
        self.start_fetch();
    }

    fn start_fetch(&mut self) {
        let (tx, rx) = mpsc::channel::<FetchMsg>();
        self.fetch_rx = Some(rx);
        self.load_error = None;

        let api_base = self.cfg.api_base.clone();
        let page = self.cfg.page;
        let timeout = Duration::from_secs(self.cfg.http_timeout_secs);

        std::thread::spawn(move || {
            let msg = match api::fetch_characters_page(&api_base, page, timeout) {
                Ok(chars) => FetchMsg::Done(chars),
                Err(e) => FetchMsg::Error(e.to_string()),
            };
            let _ = tx.send(msg);
        });
    }

    fn poll_fetch(&mut self, ctx: &eg::Context) {
        let Some(rx) = &self.fetch_rx else { return };
        match rx.try_recv() {
            Ok(FetchMsg::Done(chars)) => {
                info!("character page cached ({} records)", chars.len());
                self.movies = Some(movies::build_movies(&chars));
                self.characters = Some(chars);
                self.fetch_rx = None;
                self.resample();
                ctx.request_repaint();
            }
            Ok(FetchMsg::Error(e)) => {
                warn!("character fetch failed: {e}");
                self.fetch_rx = None;
                self.displayed.clear();
                self.load_error = Some(LOAD_ERROR_MSG.to_string());
                ctx.request_repaint();
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.fetch_rx = None;
                self.load_error = Some(LOAD_ERROR_MSG.to_string());
            }
        }
    }

    fn resample(&mut self) {
        let Some(movies) = &self.movies else { return };
        let idxs: Vec<usize> = (0..movies.len()).collect();
        self.displayed = sample::pick_random(&idxs, self.sample_count.count());
        self.load_error = None;
        self.scroll_to_top = true;
        self.queue_portraits();
    }

    /// Make sure every portrait a displayed card needs is either cached on
    /// disk or queued for download.
    fn queue_portraits(&mut self) {
        let wanted: Vec<(String, String)> = {
            let (Some(movies), Some(chars)) = (&self.movies, &self.characters) else {
                return;
            };
            self.displayed
                .iter()
                .filter_map(|&mi| movies.get(mi))
                .flat_map(|m| {
                    m.character_idxs
                        .iter()
                        .filter_map(|&ci| chars.get(ci))
                        .filter_map(|ch| {
                            ch.image_url
                                .as_deref()
                                .map(|u| (cache::url_to_cache_key(u), u.to_string()))
                        })
                        .take(CAST_PER_CARD)
                })
                .collect()
        };

        for (key, url) in wanted {
            if self.portraits.contains_key(&key) {
                continue;
            }
            let path = cache::find_cached_portrait(&key);
            let mut state = if path.is_some() {
                PortraitState::Cached
            } else {
                PortraitState::Pending
            };

            if state == PortraitState::Pending {
                if self.fetcher.is_none() {
                    let timeout = Duration::from_secs(self.cfg.http_timeout_secs);
                    match PortraitFetcher::start(timeout) {
                        Ok(f) => self.fetcher = Some(f),
                        Err(e) => warn!("portrait fetcher unavailable: {e}"),
                    }
                }
                match &self.fetcher {
                    Some(f) => f.enqueue(PortraitJob {
                        key: key.clone(),
                        url: url.clone(),
                    }),
                    None => state = PortraitState::Failed,
                }
            }

            self.portraits.insert(
                key,
                Portrait {
                    url,
                    path,
                    tex: None,
                    state,
                },
            );
        }
    }

    fn poll_portraits(&mut self, ctx: &eg::Context) {
        let mut done = Vec::new();
        if let Some(f) = &self.fetcher {
            while done.len() < MAX_DONE_PER_FRAME {
                match f.try_recv() {
                    Some(d) => done.push(d),
                    None => break,
                }
            }
        }

        let drained = done.len();
        for msg in done {
            if let Some(p) = self.portraits.get_mut(&msg.key) {
                match msg.result {
                    Ok(path) => {
                        p.path = Some(path);
                        p.state = PortraitState::Cached; // uploaded lazily during paint
                    }
                    Err(e) => {
                        warn!("portrait download failed for {}: {e}", p.url);
                        p.state = PortraitState::Failed;
                    }
                }
            }
        }

        if drained > 0 {
            ctx.request_repaint();
        }
    }

    /// Upload a cached portrait file to a texture if it isn't already.
    /// Returns true if a texture was uploaded this call.
    pub(crate) fn try_upload_portrait(&mut self, ctx: &eg::Context, key: &str) -> bool {
        let Some(p) = self.portraits.get_mut(key) else {
            return false;
        };
        if p.tex.is_some() || p.state == PortraitState::Failed {
            return false;
        }
        if p.path.is_none() {
            p.path = cache::find_cached_portrait(key);
        }
        let Some(path) = p.path.clone() else {
            return false;
        };
        match gfx::load_texture_from_path(ctx, &path, key) {
            Ok(tex) => {
                p.tex = Some(tex);
                p.state = PortraitState::Ready;
                true
            }
            Err(e) => {
                warn!("portrait texture load failed for {}: {e}", path.display());
                p.state = PortraitState::Failed;
                false
            }
        }
    }

    pub(crate) fn portrait_tex_id(&self, key: &str) -> Option<eg::TextureId> {
        self.portraits
            .get(key)
            .and_then(|p| p.tex.as_ref())
            .map(|t| t.id())
    }

    pub(crate) fn card_views(&self) -> Vec<CardView> {
        let (Some(movies), Some(chars)) = (&self.movies, &self.characters) else {
            return Vec::new();
        };

        self.displayed
            .iter()
            .filter_map(|&mi| movies.get(mi))
            .map(|m| {
                let cast = m
                    .character_idxs
                    .iter()
                    .filter_map(|&ci| chars.get(ci))
                    .filter_map(|ch| {
                        ch.image_url
                            .as_deref()
                            .map(|u| (ch.name.clone(), cache::url_to_cache_key(u)))
                    })
                    .take(CAST_PER_CARD)
                    .collect();

                CardView {
                    title: m.title.clone(),
                    cast,
                    tv_shows: m.tv_shows.iter().join(", "),
                    short_films: m.short_films.iter().join(", "),
                    park_attractions: m.park_attractions.iter().join(", "),
                }
            })
            .collect()
    }
}

// ========== App impl ==========
impl eframe::App for ReelpickApp {
    fn update(&mut self, ctx: &eg::Context, _frame: &mut eframe::Frame) {
        // First frame
        if !self.did_init {
            self.did_init = true;
            self.load_prefs();
        }

        self.poll_fetch(ctx);
        self.poll_portraits(ctx);

        if self.fetch_in_flight() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        eg::TopBottomPanel::top("topbar").show(ctx, |ui| {
            self.ui_render_topbar(ui);
        });
        self.ui_render_watchlist_panel(ctx);
        self.ui_render_footer(ctx);

        eg::CentralPanel::default().show(ctx, |ui| {
            self.ui_render_cards(ui, ctx);
        });

        self.ui_render_toast(ctx);
        self.maybe_save_prefs();
    }
}
