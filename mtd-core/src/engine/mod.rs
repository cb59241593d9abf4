//! Quarterly submission status engine and the view models it produces.

mod status_engine;
mod view_model;

pub use status_engine::QuarterlyStatusEngine;
pub use view_model::QuarterViewModel;
