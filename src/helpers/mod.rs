//! Helper functions shared by the templates and renderers

mod date;
mod html;

pub use date::*;
pub use html::*;
