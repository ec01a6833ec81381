use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};
use clap::Parser;
use console::style;
use crossbeam_channel::RecvTimeoutError;
use humansize::{DECIMAL, format_size};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use sflens::application::dto::{ImportOptions, ImportOutcome};
use sflens::application::{
    BugSession, DiscoverLogsUseCase, ExtractEntriesUseCase, ImportBundleUseCase, ProgressCallback,
    ScanArchiveUseCase, list_bundles,
};
use sflens::config::AppConfig;
use sflens::domain::entities::{
    ArtifactKind, CandidateSet, ExtractionProgress, ExtractionReport, ExtractionRequest,
    LogProjectCandidates,
};
use sflens::domain::services::CandidateRanker;
use sflens::presentation::cli::{Cli, Commands, ProgressReporter, pick_bundle, pick_entry};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = AppConfig::load(cli.config.as_deref())?
        .with_overrides(cli.download_root.clone(), cli.cache_root.clone());

    match cli.command {
        Commands::Scan { archive, json } => run_scan(&archive, json),
        Commands::Check { archive } => run_check(&archive),
        Commands::Extract {
            archive,
            output,
            entries,
            pick,
        } => run_extract(archive, output, entries, pick),
        Commands::Discover { dir, json } => run_discover(&dir, json),
        Commands::Bundles { bug } => run_bundles(&config, &bug),
        Commands::Import {
            bug,
            archive,
            full,
            wait_secs,
        } => run_import(&config, &bug, archive, full, wait_secs),
    }
}

fn run_scan(archive: &Path, json: bool) -> Result<()> {
    let candidates = ScanArchiveUseCase::new()
        .execute(archive)
        .with_context(|| format!("Failed to scan {}", archive.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        return Ok(());
    }

    println!("\n{} {}", style("Archive:").bold(), archive.display());
    for kind in ArtifactKind::ALL {
        print_ranked(kind, candidates.entries(kind));
    }
    print_warning(&candidates, archive);
    Ok(())
}

fn print_ranked(kind: ArtifactKind, entries: &[String]) {
    println!(
        "\n{} ({})",
        style(kind.name()).green().bold(),
        entries.len()
    );
    if entries.is_empty() {
        println!("  {}", style("none").dim());
    }
    for (i, entry) in entries.iter().enumerate() {
        let score = CandidateRanker::score(kind, entry);
        let marker = if i == 0 { style("*").cyan() } else { style(" ") };
        println!("  {} {:>5}  {}", marker, score, entry);
    }
}

fn print_warning(candidates: &CandidateSet, archive: &Path) {
    if let Some(warning) = candidates.warning(archive) {
        println!("\n[!] {}", style(warning).yellow());
    }
}

fn run_check(archive: &Path) -> Result<()> {
    let found = ScanArchiveUseCase::new()
        .contains_sf_logs(archive)
        .with_context(|| format!("Failed to read {}", archive.display()))?;

    if found {
        println!(
            "{} {}",
            style("SF logs found in").green(),
            archive.display()
        );
        Ok(())
    } else {
        println!("{} {}", style("No SF logs in").yellow(), archive.display());
        std::process::exit(1);
    }
}

fn run_extract(archive: PathBuf, output: PathBuf, entries: Vec<String>, pick: bool) -> Result<()> {
    let entries = if !entries.is_empty() {
        entries
    } else {
        let candidates = ScanArchiveUseCase::new()
            .execute(&archive)
            .with_context(|| format!("Failed to scan {}", archive.display()))?;
        print_warning(&candidates, &archive);

        if pick {
            pick_selection(&candidates)?
        } else {
            candidates.default_selection()
        }
    };

    if entries.is_empty() {
        println!("\n{}", style("Nothing to extract.").yellow());
        return Ok(());
    }

    let request = ExtractionRequest::new(archive, output, entries);
    let report = run_with_progress("Extracting...", move |progress| {
        ExtractEntriesUseCase::new()
            .execute(&request, Some(&progress))
            .map_err(anyhow::Error::from)
    })??;

    print_report(&report);
    Ok(())
}

fn pick_selection(candidates: &CandidateSet) -> Result<Vec<String>> {
    let Some(sf_log) = pick_entry("SF log", candidates.sf_log_entries(), true)? else {
        bail!("No SF log candidates to choose from");
    };
    let mut selection = vec![sf_log];
    selection.extend(pick_entry(
        "Android log",
        candidates.android_log_entries(),
        false,
    )?);
    selection.extend(pick_entry(
        "Screen recording",
        candidates.video_entries(),
        false,
    )?);
    Ok(selection)
}

fn print_report(report: &ExtractionReport) {
    println!("\n{}", style(report.summary()).green());
    for file in &report.extracted {
        println!(
            "  {} ({})",
            file.path.display(),
            format_size(file.bytes, DECIMAL)
        );
    }
    for (entry, reason) in &report.skipped {
        println!("  {} {} ({})", style("skipped").yellow(), entry, reason);
    }
    for error in &report.failed {
        println!("  {} {}", style("failed").red(), error);
    }
    for entry in &report.missing {
        println!("  {} {}", style("missing").yellow(), entry);
    }
}

fn run_discover(dir: &Path, json: bool) -> Result<()> {
    let candidates = DiscoverLogsUseCase::new()
        .discover_all(dir)
        .with_context(|| format!("Failed to search {}", dir.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        return Ok(());
    }

    print_candidates(&candidates);
    Ok(())
}

fn print_candidates(candidates: &LogProjectCandidates) {
    println!("\n{} {}", style("Root:").bold(), candidates.root.display());
    let lists = [
        (ArtifactKind::SfLog, &candidates.sf_logs),
        (ArtifactKind::AndroidLog, &candidates.android_logs),
        (ArtifactKind::ScreenRecord, &candidates.screen_records),
    ];
    for (kind, paths) in lists {
        println!("\n{} ({})", style(kind.name()).green().bold(), paths.len());
        for (i, path) in paths.iter().enumerate() {
            let marker = if i == 0 { style("*").cyan() } else { style(" ") };
            let shown = path.strip_prefix(&candidates.root).unwrap_or(path);
            println!("  {} {}", marker, shown.display());
        }
    }
}

fn run_bundles(config: &AppConfig, bug: &str) -> Result<()> {
    let session = BugSession::new(config, bug)?;
    let bundles = list_bundles(&session)?;

    println!(
        "\n{} {}",
        style("Download folder:").bold(),
        session.download_dir().display()
    );
    if bundles.is_empty() {
        println!("  {}", style("no bundles").dim());
        return Ok(());
    }

    println!(
        "\n{:<4} {:>10} {:<20} {}",
        style("#").bold(),
        style("SIZE").bold(),
        style("MODIFIED").bold(),
        style("NAME").bold()
    );
    println!("{}", "-".repeat(60));
    for (i, bundle) in bundles.iter().enumerate() {
        let modified = bundle
            .modified
            .map(|t| {
                DateTime::<Local>::from(t)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_default();
        println!(
            "{:<4} {:>10} {:<20} {}",
            i + 1,
            format_size(bundle.size, DECIMAL),
            modified,
            bundle.file_name()
        );
    }
    Ok(())
}

fn run_import(
    config: &AppConfig,
    bug: &str,
    archive: Option<PathBuf>,
    full: bool,
    wait_secs: Option<u64>,
) -> Result<()> {
    let session = BugSession::new(config, bug)?;

    let archive = match archive {
        Some(path) => path,
        None => {
            let bundles = list_bundles(&session)?;
            match bundles.len() {
                0 => bail!(
                    "No bundles found in {}",
                    session.download_dir().display()
                ),
                1 => bundles[0].path.clone(),
                _ => pick_bundle(&bundles)?.path.clone(),
            }
        }
    };

    let options = ImportOptions {
        full,
        ready_timeout: wait_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| config.ready_timeout()),
        ready_poll: config.ready_poll(),
    };

    println!(
        "\n{} {} for bug {}",
        style("Importing").cyan(),
        archive.display(),
        session.bug_id()
    );

    let outcome = run_with_progress("Waiting for download...", move |progress| {
        ImportBundleUseCase::new().execute(&session, &archive, &options, Some(&progress))
    })??;

    match outcome {
        ImportOutcome::Imported(result) => {
            print_report(&result.report);
            print_candidates(result.candidates());
            println!(
                "\n{} {}",
                style("Manifest:").bold(),
                result.manifest_path.display()
            );
        }
        ImportOutcome::NoSfLogs(warning) => {
            println!("\n[!] {}", style(warning).yellow());
        }
    }
    Ok(())
}

/// Runs `work` on a worker thread while the main thread drives the progress
/// bar. Ctrl+C stops waiting; the worker is left to finish on its own.
fn run_with_progress<T, F>(message: &str, work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(ProgressCallback) -> T + Send + 'static,
{
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .context("Failed to set Ctrl+C handler")?;

    let (progress_tx, progress_rx) = crossbeam_channel::unbounded::<ExtractionProgress>();
    let (done_tx, done_rx) = crossbeam_channel::bounded(1);

    let callback: ProgressCallback = Box::new(move |progress: &ExtractionProgress| {
        let _ = progress_tx.send(progress.clone());
    });
    thread::spawn(move || {
        let _ = done_tx.send(work(callback));
    });

    let reporter = ProgressReporter::for_extraction(message);
    loop {
        if !running.load(Ordering::SeqCst) {
            reporter.abandon("Interrupted");
            bail!("Interrupted by user");
        }

        while let Ok(progress) = progress_rx.try_recv() {
            reporter.update(&progress);
        }

        match done_rx.recv_timeout(POLL_INTERVAL) {
            Ok(result) => {
                while let Ok(progress) = progress_rx.try_recv() {
                    reporter.update(&progress);
                }
                reporter.finish("Done");
                return Ok(result);
            }
            Err(RecvTimeoutError::Timeout) => reporter.tick(),
            Err(RecvTimeoutError::Disconnected) => {
                reporter.abandon("Failed");
                bail!("Worker thread exited without a result");
            }
        }
    }
}
