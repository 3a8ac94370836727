//! Application state shared across all handlers.

use gist_engine::ParagraphEngine;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ParagraphEngine>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(engine: ParagraphEngine) -> Self {
        Self { engine: Arc::new(engine), start_time: Instant::now() }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
