//! pdfsplice - Merge PDF files in the order you choose.
//!
//! Reads the inputs, applies the requested order, merges, optionally
//! password-protects the result and writes it out. `--interactive` opens a
//! session for editing the order step by step instead.

mod cli;
mod logger;
mod repl;

use clap::Parser;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process;

use crate::cli::Cli;
use pdfsplice::config::{Config, OverwriteMode, output_path};
use pdfsplice::error::PdfSpliceError;
use pdfsplice::io::{PdfReader, PdfWriter};
use pdfsplice::merge::MergeEngine;
use pdfsplice::ordering::OrderCommand;
use pdfsplice::output::{MergeSummary, OutputFormatter, display_merge_statistics};
use pdfsplice::session::Session;
use pdfsplice::utils::collect_paths_for_patterns;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose, cli.log_format);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfSpliceError> {
    cli.validate()?;

    let all_inputs = collect_paths_for_patterns(&cli.inputs)?;

    if cli.interactive {
        return run_interactive(&cli, &all_inputs).await;
    }

    let mut config = cli.to_config()?;
    config.inputs = all_inputs;
    config.validate()?;

    let formatter = OutputFormatter::from_config(&config);

    if formatter.should_print() {
        formatter.section(&format!("{} v{}", pdfsplice::NAME, pdfsplice::VERSION));
        formatter.blank_line();
    }

    formatter.info(&format!("Reading {} file(s)...", config.inputs.len()));
    let mut session = Session::new();
    let names = upload_paths(&mut session, &config.inputs).await?;
    for (name, path) in names.iter().zip(&config.inputs) {
        formatter.detail(name, &path.display().to_string());
    }

    arrange(&mut session, &config)?;

    formatter.section("Merge order");
    formatter.order(session.order());
    formatter.blank_line();

    if config.dry_run {
        return dry_run(&session, &config, &formatter);
    }

    handle_output_overwrite(&config, &formatter)?;

    formatter.info("Merging documents...");
    let engine = MergeEngine::with_options(config.merge);
    let download = session.merge(&engine, config.password.as_deref(), &output_name(&config))?;

    let output = config.output.with_file_name(&download.file_name);
    let write_stats = PdfWriter::new().save(download.merged.bytes(), &output)?;

    if config.json {
        let summary = MergeSummary::from_download(&download, &output);
        println!("{}", to_json(&summary)?);
        return Ok(());
    }

    if formatter.should_print() {
        display_merge_statistics(&formatter, download.merged.statistics());
        formatter.blank_line();
        formatter.success(&format!(
            "Successfully created {} ({})",
            output.display(),
            write_stats.format_file_size()
        ));
        if download.merged.is_encrypted() {
            formatter.info("  The file is password-protected");
        }
        formatter.detail(
            "Write time",
            &format!("{:.2}s", write_stats.write_time.as_secs_f64()),
        );
    }

    Ok(())
}

/// Open an interactive session seeded with `inputs`.
async fn run_interactive(cli: &Cli, inputs: &[PathBuf]) -> Result<(), PdfSpliceError> {
    let formatter = OutputFormatter::new(cli.quiet, cli.verbose);
    let engine = MergeEngine::with_options(cli.merge_options()?);

    let mut session = Session::new();
    upload_paths(&mut session, inputs).await?;

    let overwrite_mode = if cli.force {
        OverwriteMode::Force
    } else {
        OverwriteMode::NoClobber
    };

    let mut repl = repl::Repl::new(
        session,
        engine,
        formatter,
        output_path(&cli.output),
        cli.password.clone(),
        overwrite_mode,
    );
    repl.run().await
}

/// Read `paths` and upload them under their file names.
///
/// Clashing names get a ` (n)` suffix. Returns the names used, in order.
pub(crate) async fn upload_paths(
    session: &mut Session,
    paths: &[PathBuf],
) -> Result<Vec<String>, PdfSpliceError> {
    let mut names = Vec::with_capacity(paths.len());

    for path in paths {
        let bytes = tokio::fs::read(path).await.map_err(|err| match err.kind() {
            ErrorKind::NotFound => PdfSpliceError::file_not_found(path.clone()),
            _ => PdfSpliceError::Io { source: err },
        })?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let name = session.sources().unique_name(&file_name);

        session.upload(name.clone(), bytes)?;
        names.push(name);
    }

    Ok(names)
}

/// Apply exclusions, the explicit order and move commands, in that order.
fn arrange(session: &mut Session, config: &Config) -> Result<(), PdfSpliceError> {
    for name in &config.exclude {
        session.deselect(name)?;
    }

    if let Some(order) = &config.order {
        session.apply(OrderCommand::SetOrder(order.clone()))?;
    }

    for command in &config.commands {
        session.apply(command.clone())?;
    }

    Ok(())
}

/// Check everything a merge would check, without merging.
fn dry_run(
    session: &Session,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<(), PdfSpliceError> {
    let request = session.prepare(config.password.as_deref(), &output_name(config))?;

    let reader = PdfReader::new();
    let mut total_pages = 0;
    for source in &request.sources {
        let loaded = reader.load(source)?;
        formatter.detail(source.name(), &format!("{} page(s)", loaded.page_count));
        total_pages += loaded.page_count;
    }

    let output = config.output.with_file_name(&request.file_name);

    if config.json {
        let names: Vec<String> = request.sources.iter().map(|s| s.name().to_string()).collect();
        let mut summary = MergeSummary::planned(
            &output,
            &names,
            request.sources.iter().map(|s| s.size()).sum(),
            config.merge.compression,
            request.password.is_some(),
        );
        summary.total_pages = Some(total_pages);
        println!("{}", to_json(&summary)?);
        return Ok(());
    }

    formatter.success("Dry run completed successfully");
    formatter.info(&format!(
        "  Output would be: {} ({total_pages} pages)",
        output.display()
    ));
    formatter.info("  Run without --dry-run to create the merged PDF");
    Ok(())
}

fn output_name(config: &Config) -> String {
    config
        .output
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn to_json(summary: &MergeSummary) -> Result<String, PdfSpliceError> {
    summary
        .to_json()
        .map_err(|err| PdfSpliceError::other(format!("Failed to render summary: {err}")))
}

/// Handle output file overwrite scenarios.
fn handle_output_overwrite(
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<(), PdfSpliceError> {
    if !config.output.exists() {
        return Ok(());
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(PdfSpliceError::output_exists(config.output.clone())),
        OverwriteMode::Prompt => {
            if formatter.is_quiet() {
                return Err(PdfSpliceError::output_exists(config.output.clone()));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                config.output.display()
            ));

            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| PdfSpliceError::other(format!("Failed to read input: {err}")))?;

            match response.trim().to_lowercase().as_str() {
                "y" | "yes" => Ok(()),
                _ => Err(PdfSpliceError::Cancelled),
            }
        }
    }
}
