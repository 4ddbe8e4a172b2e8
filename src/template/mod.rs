//! Template module
//!
//! This module contains the template set and the context passed to renders.

mod context;
mod set;

pub use context::TemplateContext;
pub use set::TemplateSet;
