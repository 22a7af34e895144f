use std::collections::BTreeSet;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use vstat_model::{BilingualLabel, NormalizeOptions, NormalizedRow};
use vstat_output::{CsvOutputOptions, write_normalized_csv};
use vstat_transform::{normalize_file, rows_from_frame};
use vstat_validate::validate_run;

use crate::types::{NormalizeRequest, NormalizeResult, RegionSummary};

/// Default options, or the JSON file at `config` layered over them.
pub fn load_options(config: Option<&Path>) -> Result<NormalizeOptions> {
    match config {
        Some(path) => NormalizeOptions::from_json_path(path)
            .with_context(|| format!("load options from {}", path.display())),
        None => Ok(NormalizeOptions::default()),
    }
}

pub fn run_normalize(request: &NormalizeRequest) -> Result<NormalizeResult> {
    let span = info_span!("run", input = %request.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let options = load_options(request.config.as_deref())?;
    let outcome = normalize_file(&request.input, &options)
        .with_context(|| format!("normalize {}", request.input.display()))?;

    let validation = request
        .validate
        .then(|| validate_run(&outcome.output, &outcome.wide, &options));
    let has_errors = validation
        .as_ref()
        .is_some_and(vstat_model::ValidationReport::has_errors);

    let rows = rows_from_frame(&outcome.output).context("read normalized rows")?;
    let regions = region_summaries(&rows);

    let output = if request.dry_run {
        info!("dry run, output not written");
        None
    } else if has_errors {
        warn!(
            path = %request.output.display(),
            "validation errors found, output not written"
        );
        None
    } else {
        let mut frame = outcome.output.clone();
        let csv_options = CsvOutputOptions::default().with_separator(request.separator);
        Some(write_normalized_csv(&request.output, &mut frame, &csv_options)?)
    };

    info!(
        output_rows = outcome.stats.output_rows,
        regions = regions.len(),
        duration_ms = start.elapsed().as_millis(),
        "run complete"
    );

    Ok(NormalizeResult {
        input: request.input.clone(),
        output,
        stats: outcome.stats,
        regions,
        validation,
        has_errors,
    })
}

/// Region labels configured for the run, split into their halves.
pub fn run_regions(config: Option<&Path>) -> Result<Vec<BilingualLabel>> {
    let options = load_options(config)?;
    Ok(options
        .region_labels
        .iter()
        .map(|label| BilingualLabel::parse(label))
        .collect())
}

/// Residences, rows and visitor totals per region, in table order.
pub fn region_summaries(rows: &[NormalizedRow]) -> Vec<RegionSummary> {
    let mut summaries: Vec<(RegionSummary, BTreeSet<&str>)> = Vec::new();
    for row in rows {
        let position = summaries.iter().position(|(summary, _)| {
            summary.region_ch == row.region_ch && summary.region == row.region
        });
        let index = match position {
            Some(index) => index,
            None => {
                summaries.push((
                    RegionSummary {
                        region_ch: row.region_ch.clone(),
                        region: row.region.clone(),
                        residences: 0,
                        rows: 0,
                        visitors: 0,
                    },
                    BTreeSet::new(),
                ));
                summaries.len() - 1
            }
        };
        let (summary, residences) = &mut summaries[index];
        residences.insert(row.residence_ch.as_str());
        summary.rows += 1;
        summary.visitors = summary.visitors.saturating_add(row.count);
    }
    summaries
        .into_iter()
        .map(|(mut summary, residences)| {
            summary.residences = residences.len();
            summary
        })
        .collect()
}
