//! Source and renderer test utilities

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use results_page::version::checker::Renderer;
use results_page::version::error::CheckError;
use results_page::version::source::LatestSource;
use results_page::version::state::{Region, Visibility};

/// Renderer that records every visibility it was given
#[derive(Default)]
pub struct RecordingRenderer {
    renders: Mutex<Vec<Visibility>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<Region> {
        self.renders
            .lock()
            .unwrap()
            .iter()
            .map(|v| v.shown())
            .collect()
    }

    pub fn last(&self) -> Option<Visibility> {
        self.renders.lock().unwrap().last().cloned()
    }

    pub fn count(&self, region: Region) -> usize {
        self.shown().into_iter().filter(|r| *r == region).count()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, visibility: &Visibility) {
        self.renders.lock().unwrap().push(visibility.clone());
    }
}

/// Source whose single fetch blocks until the test releases it
pub struct GatedSource {
    gate: Mutex<Option<oneshot::Receiver<Result<String, CheckError>>>>,
    fetches: Mutex<usize>,
}

impl GatedSource {
    /// Returns the source and the sender that completes its fetch
    pub fn new() -> (Self, oneshot::Sender<Result<String, CheckError>>) {
        let (tx, rx) = oneshot::channel();
        let source = Self {
            gate: Mutex::new(Some(rx)),
            fetches: Mutex::new(0),
        };
        (source, tx)
    }

    pub fn fetches(&self) -> usize {
        *self.fetches.lock().unwrap()
    }
}

#[async_trait]
impl LatestSource for GatedSource {
    async fn fetch_latest(&self) -> Result<String, CheckError> {
        *self.fetches.lock().unwrap() += 1;
        let rx = self.gate.lock().unwrap().take();
        match rx {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(CheckError::InvalidResponse("gate dropped".to_string()))),
            None => Err(CheckError::InvalidResponse("gate already used".to_string())),
        }
    }
}
