//! Workflow engine
//!
//! This module contains the engine that renders every template of a run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::{debug, info};

use crate::config::{read_manifest, FileEntry, GenerationManifest};
use crate::constants::DEFAULT_OUTPUT_PATH;
use crate::errors::{duplicate_destination_error, Result as GenResult};
use crate::file_ops::{report_generation_failure, write_to_file_using_template, GeneratedFile};
use crate::template::{TemplateContext, TemplateSet};

use super::context::{PlannedOperation, WorkflowContext};

/// Options for a generation run
#[derive(Debug, Clone, Default)]
pub struct ProcessingOptions {
    /// Path to the generation manifest, if any
    pub config_path: Option<PathBuf>,
    /// Templates directory overriding the manifest's
    pub templates_dir: Option<PathBuf>,
    /// Output directory overriding the manifest's
    pub output_dir: Option<PathBuf>,
    /// Whether to only plan the writes
    pub dry_run: bool,
}

/// Renders all templates of a run
///
/// This function orchestrates the workflow steps:
/// 1. Read the manifest and apply the command-line overrides
/// 2. Load every template from the templates directory
/// 3. Work out which files to generate
/// 4. Render and write each file, or only plan it in dry-run mode
///
/// A file that fails is logged and counted, and the run continues with the
/// next one. Inspect the returned context to decide how the run went.
///
/// # Errors
/// * Returns an error if the manifest is unreadable or invalid
/// * Returns an error if no templates directory is known or it cannot be loaded
pub fn process_templates(options: ProcessingOptions) -> Result<WorkflowContext> {
    // Step 1: Read the manifest
    let manifest = match &options.config_path {
        Some(path) => read_manifest(path)?,
        None => GenerationManifest::default(),
    }
    .with_overrides(options.templates_dir, options.output_dir);
    manifest.validate(true)?;

    let templates_dir = manifest.templates.clone().ok_or_else(|| {
        anyhow!("No templates directory given. Use --templates or set 'templates' in the manifest.")
    })?;
    let output_dir = manifest
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));

    // Step 2: Load the templates
    let templates = TemplateSet::load_from_dir(&templates_dir)
        .with_context(|| format!("Failed to load templates from {}", templates_dir.display()))?;

    run_generation(&manifest, &templates, &output_dir, options.dry_run)
}

/// Generates the files described by `manifest` from an already loaded template set
///
/// When two jobs resolve to the same destination the first one is generated
/// and the later one is recorded as a failure.
pub fn run_generation(
    manifest: &GenerationManifest,
    templates: &TemplateSet,
    output_dir: &Path,
    dry_run: bool,
) -> Result<WorkflowContext> {
    let mut context = WorkflowContext::new(dry_run);
    context.stats.templates_found = templates.len();

    // Step 3: Work out which files to generate
    let jobs = resolve_jobs(manifest, templates);
    if jobs.is_empty() {
        info!("No templates found to generate");
        return Ok(context);
    }

    info!(
        "Generating {} files into {}{}...",
        jobs.len(),
        output_dir.display(),
        if dry_run { " (dry run)" } else { "" }
    );

    let global_context = manifest.global_context();

    // Step 4: Render each file
    let mut claimed: HashMap<PathBuf, String> = HashMap::new();
    for entry in jobs {
        let relative = match entry.checked_destination() {
            Ok(relative) => relative,
            Err(e) => {
                let destination = output_dir.join(entry.destination_path());
                report_generation_failure(&destination, &e);
                context.record_failure(&entry.template, destination, &e);
                continue;
            }
        };
        let destination = output_dir.join(&relative);

        // The first template claiming a destination wins
        if let Some(previous) = claimed.get(&relative) {
            let e = duplicate_destination_error(relative.clone(), &entry.template, previous);
            report_generation_failure(&destination, &e);
            context.record_failure(&entry.template, destination, &e);
            continue;
        }
        claimed.insert(relative, entry.template.clone());

        let file_context = global_context.merged(&entry.template_context());

        let result = if dry_run {
            plan_file(templates, &entry.template, &destination).map(|operation| {
                debug!(
                    "Planned: {} -> {}",
                    operation.template,
                    operation.destination.display()
                );
                context.add_planned_operation(operation);
            })
        } else {
            generate_file(templates, &entry.template, &destination, &file_context)
                .map(|generated| context.record_generated(generated))
        };

        if let Err(e) = result {
            report_generation_failure(&destination, &e);
            context.record_failure(&entry.template, destination, &e);
        }
    }

    info!(
        "Finished: {} generated, {} planned, {} failed",
        context.stats.files_generated, context.stats.files_planned, context.stats.errors
    );

    Ok(context)
}

/// Lists the files to generate
///
/// The manifest's explicit list wins; otherwise every template of the set is
/// rendered next to its own relative directory.
pub fn resolve_jobs(manifest: &GenerationManifest, templates: &TemplateSet) -> Vec<FileEntry> {
    match &manifest.files {
        Some(files) => files.clone(),
        None => templates
            .names()
            .iter()
            .map(|name| FileEntry::for_template(name))
            .collect(),
    }
}

fn generate_file(
    templates: &TemplateSet,
    template_name: &str,
    destination: &Path,
    context: &TemplateContext,
) -> GenResult<GeneratedFile> {
    let template = templates.get_template(template_name)?;
    write_to_file_using_template(destination, &template, context)
}

fn plan_file(
    templates: &TemplateSet,
    template_name: &str,
    destination: &Path,
) -> GenResult<PlannedOperation> {
    templates.get_template(template_name)?;
    Ok(PlannedOperation {
        template: template_name.to_string(),
        destination: destination.to_path_buf(),
    })
}
