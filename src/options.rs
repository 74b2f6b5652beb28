//! Knobs for opening a [`Session`](crate::Session).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag a caller can raise to abort parsing or graph building.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub(crate) fn is_cancelled(token: Option<&CancellationToken>) -> bool {
    token.map_or(false, CancellationToken::is_cancelled)
}

#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Analyse the remaining images when some fail to parse, instead of failing the session.
    pub skip_bad_images: bool,
    /// Record cross-references while building the graph.
    pub create_xrefs: bool,
    /// Parse and disassemble images on the rayon pool.
    pub parallel: bool,
    pub cancellation: Option<CancellationToken>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions { skip_bad_images: false, create_xrefs: true, parallel: true, cancellation: None }
    }
}

impl AnalysisOptions {
    pub fn with_skip_bad_images(mut self, skip: bool) -> Self {
        self.skip_bad_images = skip;
        self
    }

    pub fn with_xrefs(mut self, create: bool) -> Self {
        self.create_xrefs = create;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}
