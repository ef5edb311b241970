//! `score` command: JSON Lines reviews in, scored JSON Lines out.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use fuzzysat_core::{AppConfig, ReviewRecord, SatisfactionLabel, ScoredReview};
use fuzzysat_engine::{score_reviews, ControlSystem};

/// Rows echoed to stdout after scoring.
const SAMPLE_ROWS: usize = 10;

/// Score every review in `input` and write the results to `output`.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, the system has
/// no `satisfaction` output, or the output cannot be written. Rows that
/// fail inference are written with a null score and do not abort the run.
pub(crate) fn run_score(
    system: &ControlSystem,
    config: &AppConfig,
    input: &Path,
    output: &Path,
    limit: Option<usize>,
    parallel: bool,
) -> anyhow::Result<()> {
    let records = read_reviews(input, limit)?;
    tracing::info!(
        input = %input.display(),
        reviews = records.len(),
        parallel,
        "scoring reviews"
    );

    let scored = score_reviews(system, records, &config.label_thresholds, parallel)?;
    write_scored(output, &scored)?;

    let failed = scored
        .iter()
        .filter(|r| r.satisfaction_score.is_none())
        .count();
    if failed > 0 {
        tracing::warn!(failed, "some reviews could not be scored");
    }
    tracing::info!(
        output = %output.display(),
        scored = scored.len() - failed,
        failed,
        "scored reviews written"
    );

    print_sample(&scored);
    print_label_counts(&scored);
    Ok(())
}

/// Read review records, one JSON object per non-blank line.
///
/// # Errors
///
/// Returns an error naming the file and line on I/O or parse failure.
pub(crate) fn read_reviews(path: &Path, limit: Option<usize>) -> anyhow::Result<Vec<ReviewRecord>> {
    let file =
        File::open(path).with_context(|| format!("failed to open reviews {}", path.display()))?;
    let limit = limit.unwrap_or(usize::MAX);

    let mut records = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        if records.len() >= limit {
            break;
        }
        let line = line.with_context(|| format!("failed to read {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let record: ReviewRecord = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid review record", path.display(), idx + 1))?;
        records.push(record);
    }
    Ok(records)
}

/// Write scored reviews as JSON Lines.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub(crate) fn write_scored(path: &Path, scored: &[ScoredReview]) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create output {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for row in scored {
        serde_json::to_writer(&mut writer, row)?;
        writer.write_all(b"\n")?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn print_sample(scored: &[ScoredReview]) {
    if scored.is_empty() {
        println!("no reviews to score");
        return;
    }

    println!("{:<10}{:<8}{:<8}{:<8}TITLE", "SENTIMENT", "WORDS", "SCORE", "LABEL");
    for row in scored.iter().take(SAMPLE_ROWS) {
        let score = row
            .satisfaction_score
            .map_or_else(|| "-".to_string(), |s| format!("{s:.2}"));
        println!(
            "{:<10}{:<8}{:<8}{:<8}{}",
            row.sentiment.as_deref().unwrap_or("-"),
            row.review_length,
            score,
            row.fuzzy_satisfaction,
            row.product_title.as_deref().unwrap_or("")
        );
    }
}

fn print_label_counts(scored: &[ScoredReview]) {
    let count = |label: SatisfactionLabel| {
        scored
            .iter()
            .filter(|r| r.fuzzy_satisfaction == label)
            .count()
    };
    println!(
        "\n{} reviews: {} high, {} medium, {} low, {} unknown",
        scored.len(),
        count(SatisfactionLabel::High),
        count(SatisfactionLabel::Medium),
        count(SatisfactionLabel::Low),
        count(SatisfactionLabel::Unknown)
    );
}
