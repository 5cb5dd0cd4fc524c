//! Core engine for ergowatch

pub mod engine;
pub mod filter;
pub mod scheduler;
pub mod triangulate;

pub use engine::PostureEngine;
pub use filter::TrailingFilter;
pub use scheduler::AlertScheduler;
pub use triangulate::{triangulate, TriangulationError};
