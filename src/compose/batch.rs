use std::path::Path;

use anyhow::Context;

use crate::compose::config::JobConfig;
use crate::compose::slide::{SlideComposer, SlideOutcome};
use crate::foundation::error::StoreshotsResult;
use crate::text::fonts::FontResolver;

/// Outcome of one configured slide, in job order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideReport {
    /// 0-based position in the job list.
    pub index: usize,
    pub label: String,
    pub output_name: String,
    pub outcome: SlideOutcome,
}

impl SlideReport {
    /// One console line, e.g. `[ 3/10] ok      10 Pro Tools.  -> 03-tools.png`.
    pub fn progress_line(&self, total: usize) -> String {
        let n = self.index + 1;
        match &self.outcome {
            SlideOutcome::Built { .. } => format!(
                "[{n:2}/{total}] ok      {:<25} -> {}",
                self.label, self.output_name
            ),
            SlideOutcome::MissingSource { source } => format!(
                "[{n:2}/{total}] missing {:<25}    (Missing: {source})",
                self.label
            ),
            SlideOutcome::Failed { error } => format!(
                "[{n:2}/{total}] failed  {:<25}    ({error})",
                self.label
            ),
        }
    }
}

/// Aggregate over every slide of a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub slides: Vec<SlideReport>,
}

impl FromIterator<SlideReport> for BatchReport {
    fn from_iter<I: IntoIterator<Item = SlideReport>>(iter: I) -> Self {
        Self {
            slides: iter.into_iter().collect(),
        }
    }
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.slides.len()
    }

    pub fn created(&self) -> usize {
        self.slides.iter().filter(|s| s.outcome.is_built()).count()
    }

    /// Source names that were not found, in job order.
    pub fn missing(&self) -> Vec<&str> {
        self.slides
            .iter()
            .filter_map(|s| match &s.outcome {
                SlideOutcome::MissingSource { source } => Some(source.as_str()),
                SlideOutcome::Built { .. } | SlideOutcome::Failed { .. } => None,
            })
            .collect()
    }

    pub fn failed(&self) -> usize {
        self.failures().len()
    }

    /// `(output name, error)` of every slide that failed, in job order.
    pub fn failures(&self) -> Vec<(&str, &str)> {
        self.slides
            .iter()
            .filter_map(|s| match &s.outcome {
                SlideOutcome::Failed { error } => Some((s.output_name.as_str(), error.as_str())),
                SlideOutcome::Built { .. } | SlideOutcome::MissingSource { .. } => None,
            })
            .collect()
    }

    /// Paths of every written slide, in job order.
    pub fn outputs(&self) -> Vec<&Path> {
        self.slides
            .iter()
            .filter_map(|s| match &s.outcome {
                SlideOutcome::Built { output } => Some(output.as_path()),
                SlideOutcome::MissingSource { .. } | SlideOutcome::Failed { .. } => None,
            })
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.created() == self.total()
    }

    /// `Generated X/N screenshots.`, with a failure count appended when any slide failed.
    pub fn summary(&self) -> String {
        let base = format!("Generated {}/{} screenshots.", self.created(), self.total());
        match self.failed() {
            0 => base,
            n => format!("{base} {n} failed."),
        }
    }
}

/// Source names of `config` that do not exist under `source_dir`.
pub fn missing_sources(config: &JobConfig, source_dir: &Path) -> Vec<String> {
    config
        .slides
        .iter()
        .filter(|s| !source_dir.join(&s.source).exists())
        .map(|s| s.source.clone())
        .collect()
}

/// Build every slide of `config` in order.
///
/// An invalid job or an uncreatable output directory fails the whole run before any
/// slide is touched. After that, missing sources and per-slide failures are recorded in
/// the report and the remaining slides still run.
#[tracing::instrument(skip(config, fonts), fields(slides = config.slides.len()))]
pub fn run_batch(
    config: &JobConfig,
    source_dir: &Path,
    output_dir: &Path,
    fonts: &dyn FontResolver,
) -> StoreshotsResult<BatchReport> {
    config.validate()?;
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create output dir '{}'", output_dir.display()))?;

    let missing = missing_sources(config, source_dir);
    if !missing.is_empty() {
        tracing::warn!(
            count = missing.len(),
            dir = %source_dir.display(),
            "source screenshot(s) missing: {}",
            missing.join(", ")
        );
    }

    let composer = SlideComposer::new(&config.layout, fonts);
    let total = config.slides.len();
    let mut report = BatchReport::default();
    for (index, spec) in config.slides.iter().enumerate() {
        let outcome = match composer.build(spec, source_dir, output_dir) {
            Ok(outcome) => outcome,
            Err(e) => {
                let error = format!("{e:#}");
                tracing::error!(output = %spec.output, %error, "slide failed");
                SlideOutcome::Failed { error }
            }
        };
        let slide = SlideReport {
            index,
            label: spec.label().to_string(),
            output_name: spec.output.clone(),
            outcome,
        };
        tracing::info!("{}", slide.progress_line(total));
        report.slides.push(slide);
    }

    tracing::info!(
        created = report.created(),
        failed = report.failed(),
        total = report.total(),
        "{}",
        report.summary()
    );
    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/batch.rs"]
mod tests;
