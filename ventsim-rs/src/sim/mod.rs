//! The simulation pipeline: integration, ICU demand and chart reshaping.
mod chart;
mod demand;
mod pipeline;
mod trajectory;

pub use chart::*;
pub use demand::*;
pub use pipeline::*;
pub use trajectory::*;
