//! Workflow module
//!
//! This module contains components for orchestrating a generation run.

mod context;
mod engine;

pub use context::{FailedFile, FailureKind, PlannedOperation, WorkflowContext, WorkflowStats};
pub use engine::{ProcessingOptions, process_templates, resolve_jobs, run_generation};
