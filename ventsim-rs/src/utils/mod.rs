pub mod ascii_plot;
mod ma;

pub use ascii_plot::*;
pub use ma::*;
