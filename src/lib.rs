// Library exports for wdi-figures

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod figure;
pub mod runtime;
pub mod select;
pub mod source;
pub mod transform;
pub mod year;

pub use config::FigureConfig;
pub use error::{FigureError, Result};
pub use figure::Figure;
pub use runtime::return_figures;
