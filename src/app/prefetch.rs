// src/app/prefetch.rs — background portrait downloads for displayed cards
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::app::cache::download_and_store_portrait;

const WORKER_COUNT: usize = 4;

pub struct PortraitJob {
    pub key: String,
    pub url: String,
}

pub struct PortraitDone {
    pub key: String,
    pub result: Result<PathBuf, String>,
}

/// Small worker pool with a shared pooled HTTP client. Jobs go in, finished
/// cache paths come back; the UI thread drains completions once per frame.
pub struct PortraitFetcher {
    work_tx: Sender<PortraitJob>,
    done_rx: Receiver<PortraitDone>,
}

impl PortraitFetcher {
    pub fn start(timeout: Duration) -> Result<Self, String> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("reelpick/portraits")
            .timeout(timeout)
            .pool_max_idle_per_host(8)
            .default_headers({
                use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
                let mut h = HeaderMap::new();
                h.insert(ACCEPT, HeaderValue::from_static("image/webp,image/*;q=0.8,*/*;q=0.5"));
                h
            })
            .build()
            .map_err(|e| format!("http client build: {e}"))?;
        let client = Arc::new(client);

        let (work_tx, work_rx) = mpsc::channel::<PortraitJob>();
        let (done_tx, done_rx) = mpsc::channel::<PortraitDone>();
        let work_rx = Arc::new(Mutex::new(work_rx));

        for _ in 0..WORKER_COUNT {
            let work_rx = Arc::clone(&work_rx);
            let done_tx = done_tx.clone();
            let client = Arc::clone(&client);

            std::thread::spawn(move || loop {
                let job = { let rx = work_rx.lock().unwrap(); rx.recv() };
                let Ok(job) = job else { break };

                let result = download_and_store_portrait(&client, &job.url, &job.key);
                let _ = done_tx.send(PortraitDone { key: job.key, result });
            });
        }

        Ok(Self { work_tx, done_rx })
    }

    pub fn enqueue(&self, job: PortraitJob) {
        let _ = self.work_tx.send(job);
    }

    pub fn try_recv(&self) -> Option<PortraitDone> {
        match self.done_rx.try_recv() {
            Ok(done) => Some(done),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}
