// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Evaluator: runs the Active Metric List and aggregates one report
//!
//! Metrics run strictly sequentially in list order; call order is part of
//! the observable contract because some scorers keep corpus-level state
//! across calls. A failing scorer aborts the whole report — this layer
//! never skips a metric or returns a partial report.

use crate::align::CorpusAlignment;
use crate::error::{Error, Result};
use crate::registry::{MetricDescriptor, ReportNames, ResolvedMetrics, BLEU_TIER_NAMES};
use crate::scorer::{Scores, ScorerProvider};
use std::collections::BTreeMap;

/// Flat report: sub-metric name to score, covering exactly the names
/// declared by the Active Metric List.
pub type ScoreReport = BTreeMap<String, f64>;

/// Configured metric orchestrator.
///
/// Holds the Active Metric List for its lifetime. Scorers may hold
/// external process state, so an `Evaluator` must not be shared across
/// threads without external synchronization; independent instances are
/// safe to use concurrently.
#[derive(Debug)]
pub struct Evaluator {
    descriptors: Vec<MetricDescriptor>,
}

impl Evaluator {
    /// Evaluator running the full metric catalog.
    pub fn new(provider: &dyn ScorerProvider) -> Self {
        let resolved = ResolvedMetrics {
            bleu_tiers: BLEU_TIER_NAMES.len(),
            meteor: true,
            rouge_l: true,
            cider: true,
            spice: true,
        };
        Self {
            descriptors: resolved.load(provider),
        }
    }

    /// Evaluator with the given sub-metrics omitted.
    ///
    /// The omission set is validated against the closed catalog before
    /// any scorer is built; an unrecognized name fails construction.
    /// Omitting a tier of the vector metric also omits every higher tier.
    pub fn with_omitted<I, S>(provider: &dyn ScorerProvider, omit: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let resolved = ResolvedMetrics::resolve(omit)?;
        Ok(Self {
            descriptors: resolved.load(provider),
        })
    }

    /// Declared sub-metric names in execution order.
    pub fn metric_names(&self) -> Vec<&'static str> {
        self.descriptors
            .iter()
            .flat_map(|d| d.names())
            .copied()
            .collect()
    }

    /// Whether the Active Metric List is empty.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Score one hypothesis against one reference set.
    ///
    /// Wraps the pair into a size-1 alignment and runs every active
    /// metric once. An empty Active Metric List yields an empty report.
    pub fn evaluate_pair<S: AsRef<str>>(
        &mut self,
        references: &[S],
        hypothesis: &str,
    ) -> Result<ScoreReport> {
        let alignment = CorpusAlignment::from_pair(references, hypothesis)?;
        self.evaluate_alignment(&alignment)
    }

    /// Score a corpus of hypotheses against parallel reference sets.
    ///
    /// Only each metric's corpus-level aggregate enters the report;
    /// per-item breakdowns are discarded.
    pub fn evaluate_corpus<S: AsRef<str>, H: AsRef<str>>(
        &mut self,
        reference_sets: &[impl AsRef<[S]>],
        hypotheses: &[H],
    ) -> Result<ScoreReport> {
        let alignment = CorpusAlignment::from_aligned(reference_sets, hypotheses)?;
        self.evaluate_alignment(&alignment)
    }

    /// Run every active metric over a pre-built alignment.
    pub fn evaluate_alignment(&mut self, alignment: &CorpusAlignment) -> Result<ScoreReport> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "evaluate",
            items = alignment.len(),
            metrics = self.descriptors.len()
        )
        .entered();

        let mut report = ScoreReport::new();
        for descriptor in &mut self.descriptors {
            let output = descriptor
                .scorer
                .compute_score(&alignment.references, &alignment.hypotheses)?;
            merge(&mut report, &descriptor.names, &output.aggregate)?;
        }
        Ok(report)
    }

    /// Release every scorer's external resources.
    ///
    /// Attempts release of all scorers even if one fails, surfacing the
    /// first failure. Idempotent; dropping the evaluator also releases
    /// best-effort, so calling this is only needed to observe release
    /// errors.
    pub fn close(&mut self) -> Result<()> {
        let mut first_err = None;
        for descriptor in &mut self.descriptors {
            if let Err(err) = descriptor.scorer.close() {
                first_err.get_or_insert(err);
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Zip declared names with the aggregate's values into the report.
fn merge(report: &mut ScoreReport, names: &ReportNames, aggregate: &Scores) -> Result<()> {
    let names = names.names();
    if names.len() != aggregate.len() {
        return Err(Error::ScoreShape {
            name: names[0],
            expected: names.len(),
            got: aggregate.len(),
        });
    }
    for (name, score) in names.iter().zip(aggregate.values()) {
        report.insert((*name).to_string(), score);
    }
    Ok(())
}

/// One-shot corpus evaluation over parallel reference streams.
///
/// Builds a transient full-catalog evaluator, transposes the streams so
/// position *i* across all streams forms item *i*'s reference set,
/// evaluates once and releases every scorer — on the error path too.
/// Each score is reported through `tracing::info!` when the `tracing`
/// feature is enabled.
pub fn compute_metrics<S: AsRef<str>, H: AsRef<str>>(
    provider: &dyn ScorerProvider,
    reference_streams: &[impl AsRef<[S]>],
    hypotheses: &[H],
) -> Result<ScoreReport> {
    let alignment = CorpusAlignment::from_streams(reference_streams, hypotheses)?;
    let mut evaluator = Evaluator::new(provider);
    let report = evaluator.evaluate_alignment(&alignment)?;
    evaluator.close()?;

    #[cfg(feature = "tracing")]
    for (name, score) in &report {
        tracing::info!(metric = %name, score, "corpus score");
    }

    Ok(report)
}

/// One-shot evaluation of a single hypothesis/reference-set pair over the
/// full catalog, releasing every scorer before returning.
pub fn compute_individual_metrics<S: AsRef<str>>(
    provider: &dyn ScorerProvider,
    references: &[S],
    hypothesis: &str,
) -> Result<ScoreReport> {
    let mut evaluator = Evaluator::new(provider);
    let report = evaluator.evaluate_pair(references, hypothesis)?;
    evaluator.close()?;
    Ok(report)
}
