//! Logging facilities for Horizon Inspector.
//!
//! Horizon Inspector uses the `tracing` crate for instrumentation. Nothing is
//! printed unless the host installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_inspector=debug")
//!         .init();
//! }
//! ```
//!
//! Every event is emitted under one of the [`targets`], so a directive such
//! as `horizon_inspector::sort=trace` narrows output to one subsystem.

/// Span names used throughout Horizon Inspector for tracing.
pub mod span_names {
    /// Record enumeration and column discovery.
    pub const CACHE: &str = "horizon_inspector::cache";
    /// A sort pass over the visible rows.
    pub const SORT: &str = "horizon_inspector::sort";
    /// One draw pass of the grid.
    pub const DRAW: &str = "horizon_inspector::draw";
    /// Grid activation.
    pub const ACTIVATE: &str = "horizon_inspector::activate";
}

/// Target names for log filtering.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "horizon_inspector_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_inspector_core::signal";
    /// Record sources and stores.
    pub const SOURCE: &str = "horizon_inspector::source";
    /// Row building and sorting.
    pub const SORT: &str = "horizon_inspector::sort";
    /// Grid controller.
    pub const GRID: &str = "horizon_inspector::grid";
    /// Source registry.
    pub const REGISTRY: &str = "horizon_inspector::registry";
    /// Configuration loading.
    pub const CONFIG: &str = "horizon_inspector::config";
}

/// A guard for performance tracing spans.
///
/// The span stays entered until the guard is dropped.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_inspector::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
