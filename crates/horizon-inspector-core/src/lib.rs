//! Core systems for Horizon Inspector.
//!
//! This crate provides the foundation the inspector engine is built on:
//!
//! - **Signal/Slot System**: Type-safe change notification
//! - **Logging**: `tracing` targets, span names and performance spans
//! - **Geometry**: Points, sizes and rectangles for cell layout
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_inspector_core::Signal;
//!
//! let rows_rebuilt = Signal::<usize>::new();
//!
//! let conn_id = rows_rebuilt.connect(|count| {
//!     println!("{} rows visible", count);
//! });
//!
//! rows_rebuilt.emit(3);
//! rows_rebuilt.disconnect(conn_id);
//! ```

pub mod geometry;
pub mod logging;
pub mod signal;

pub use geometry::{Point, Rect, Size};
pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
