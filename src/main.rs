use std::process::ExitCode;

use anyhow::Result;
use clap::ArgMatches;
use colored::Colorize;
use human_panic::setup_panic;
use log::error;

use tmplgen::cli::{
    get_config_path, get_log_file, get_matches, get_output_dir, get_templates_dir, get_verbosity,
    is_dry_run,
};
use tmplgen::logging::{format_message, init_logger};
use tmplgen::workflow::{process_templates, ProcessingOptions, WorkflowContext};

fn main() -> ExitCode {
    setup_panic!();

    let matches = get_matches();
    if let Err(e) = init_logger(get_verbosity(&matches), &get_log_file(&matches)) {
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }

    match run(&matches) {
        Ok(context) if !context.has_failures() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &ArgMatches) -> Result<WorkflowContext> {
    let options = ProcessingOptions {
        config_path: get_config_path(matches),
        templates_dir: get_templates_dir(matches),
        output_dir: get_output_dir(matches),
        dry_run: is_dry_run(matches),
    };

    let context = process_templates(options)?;
    print_summary(&context);
    Ok(context)
}

fn print_summary(context: &WorkflowContext) {
    let stats = &context.stats;
    let summary = if context.dry_run {
        format!("Planned {} of {} templates", stats.files_planned, stats.templates_found)
    } else {
        format!(
            "Generated {} files ({} bytes) from {} templates",
            stats.files_generated, stats.bytes_written, stats.templates_found
        )
    };

    if context.has_failures() {
        let message = format!("{summary}, {} failed", stats.errors);
        println!("{}", format_message(&message, &message.red().bold().to_string()));
        for failure in &context.failures {
            println!(
                "  {} -> {}: {}",
                failure.template,
                failure.destination.display(),
                failure.reason
            );
        }
    } else {
        println!("{}", format_message(&summary, &summary.green().to_string()));
    }

    if context.dry_run {
        for operation in &context.planned_operations {
            println!("  {} -> {}", operation.template, operation.destination.display());
        }
    }
}
