//! The `leakscope scan` command: walk history, detect, escalate, report.

mod output;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use anyhow::Context as _;
use rayon::prelude::*;

use leakscope_core::prelude::*;
use leakscope_llm::{Escalator, Evaluation, OpenAiScorer};

use crate::ScanArgs;
use crate::git::Repo;
use crate::ui::{
    self, colors, create_commit_progress, create_escalation_spinner, pluralise_word, print_info,
    print_warning,
};

/// Runs a full history scan per the CLI arguments.
pub fn run(args: &ScanArgs) -> anyhow::Result<()> {
    let started = Instant::now();

    ui::print_command_header("scan");
    print_info(&format!("repo: {}", args.repo));

    let repo = Repo::prepare(&args.repo)?;

    if repo.is_shallow() {
        print_warning(
            "shallow clone detected, history scan limited to available commits\nrun `git fetch --unshallow` for full history\n",
        );
    }

    let (commits, file_changes) = extract_history(&repo, args.commits)?;
    print_info(&format!(
        "found {} {}, {} {} changed",
        commits.len(),
        pluralise_word(commits.len(), "commit", "commits"),
        file_changes.len(),
        pluralise_word(file_changes.len(), "file", "files"),
    ));

    let findings = detect(args, &file_changes)?;

    let evaluations = if args.llm {
        Some(escalate(args, &findings, &commits, &file_changes)?)
    } else {
        None
    };

    let report = output::Report::assemble(&commits, &file_changes, &findings, evaluations.as_deref());
    output::write_report(&args.out, &report)?;

    print_summary(args, &findings, &report, started.elapsed());
    Ok(())
}

/// Materializes commit records and per-file diffs for the scan window,
/// fanning the diff extraction out across rayon workers.
fn extract_history(repo: &Repo, limit: usize) -> anyhow::Result<(Vec<Commit>, Vec<FileChange>)> {
    let commit_ids = repo.collect_commits(limit)?;
    if commit_ids.is_empty() {
        return Ok((Vec::new(), Vec::new()));
    }

    let pb = create_commit_progress(commit_ids.len());
    let progress = AtomicUsize::new(0);

    let chunk_size = (commit_ids.len() / rayon::current_num_threads().max(1)).max(16);

    let per_commit: Vec<(Option<Commit>, Vec<FileChange>)> = commit_ids
        .par_chunks(chunk_size)
        .flat_map(|chunk| {
            let local_repo = repo.thread_local();
            chunk
                .iter()
                .map(|&oid| {
                    let record = local_repo.commit_record(oid);
                    // A commit we cannot read yields no record and no
                    // changes; the walk continues past it.
                    let changes = if record.is_some() {
                        local_repo.commit_changes(oid)
                    } else {
                        Vec::new()
                    };

                    let completed = progress.fetch_add(1, Ordering::Relaxed) + 1;
                    pb.set_position(completed as u64);

                    (record, changes)
                })
                .collect::<Vec<_>>()
        })
        .collect();

    pb.finish_and_clear();

    let mut commits = Vec::with_capacity(per_commit.len());
    let mut file_changes = Vec::new();
    for (record, changes) in per_commit {
        commits.extend(record);
        file_changes.extend(changes);
    }

    Ok((commits, file_changes))
}

/// Runs both detectors over every change that survives the filter.
fn detect(args: &ScanArgs, file_changes: &[FileChange]) -> anyhow::Result<Vec<Finding>> {
    let catalog = RuleCatalog::builtin()?;
    let thresholds = EntropyThresholds {
        base64: args.base64_threshold,
        hex: args.hex_threshold,
    };

    let findings = file_changes
        .par_iter()
        .filter(|change| !should_skip(&change.file_path, &change.diff_content))
        .flat_map_iter(|change| {
            let mut found = detect_patterns(&catalog, change);
            found.extend(detect_entropy(change, thresholds));
            found
        })
        .collect();

    Ok(findings)
}

/// Scores every finding with the LLM. Missing scorer configuration is fatal
/// before the first request; per-finding failures degrade inside the batch.
fn escalate(
    args: &ScanArgs,
    findings: &[Finding],
    commits: &[Commit],
    file_changes: &[FileChange],
) -> anyhow::Result<Vec<Evaluation>> {
    let scorer = OpenAiScorer::from_env()?;
    let escalator = Escalator::new(Arc::new(scorer))
        .with_max_in_flight(args.llm_concurrency)
        .with_timeout(Duration::from_secs(args.llm_timeout));

    let spinner = create_escalation_spinner(findings.len());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime for escalation")?;
    let evaluations = runtime.block_on(escalator.evaluate_all(findings, commits, file_changes));

    spinner.finish_and_clear();
    Ok(evaluations)
}

fn print_summary(
    args: &ScanArgs,
    findings: &[Finding],
    report: &output::Report<'_>,
    elapsed: Duration,
) {
    println!();

    if findings.is_empty() {
        println!(
            "{} {}",
            colors::success().apply_to(ui::indicators::SUCCESS),
            colors::secondary().apply_to(format!(
                "no candidate secrets found ({})",
                ui::format_duration(elapsed)
            ))
        );
    } else {
        println!(
            "{} {} candidate {} ({})",
            colors::error().apply_to(ui::indicators::ERROR),
            colors::secondary().apply_to(findings.len()),
            colors::muted().apply_to(pluralise_word(findings.len(), "secret", "secrets")),
            colors::muted().apply_to(ui::format_duration(elapsed))
        );

        if let Some(records) = report.llm_records() {
            let breakdown = ui::build_severity_summary(records, output::LlmRecord::severity);
            println!("  {breakdown}");
            println!(
                "  {}",
                colors::muted().apply_to(format!(
                    "{} classified as likely real {}",
                    report.high_risk_count(),
                    pluralise_word(report.high_risk_count(), "secret", "secrets")
                ))
            );
        }
    }

    println!(
        "  {}",
        colors::muted().apply_to(format!("report written to {}", args.out.display()))
    );
}
