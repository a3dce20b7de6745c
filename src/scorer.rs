// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Uniform scoring contract for external metric collaborators
//!
//! The actual scoring mathematics (n-gram overlap, consensus weighting,
//! LCS alignment, semantic-graph matching) live outside this crate. They
//! plug in through [`Scorer`], and a [`ScorerProvider`] supplies one
//! instance per catalog entry.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Indexed text mapping: item index to its ordered strings.
///
/// For references the value holds the whole reference set; for hypotheses
/// it holds exactly one element. Keys are dense `0..n`, so iteration order
/// equals input order.
pub type IndexedText = BTreeMap<usize, Vec<String>>;

/// Scores returned by one scorer invocation: one value for a scalar
/// metric, an ordered family for a vector metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scores {
    /// A single scalar score
    One(f64),
    /// An ordered family of sub-scores (e.g. cumulative n-gram tiers)
    Many(SmallVec<[f64; 4]>),
}

impl Scores {
    /// Number of individual score values carried.
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(v) => v.len(),
        }
    }

    /// Whether no score values are carried (empty vector family).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the carried values in order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        match self {
            Self::One(s) => std::slice::from_ref(s).iter().copied(),
            Self::Many(v) => v.as_slice().iter().copied(),
        }
    }
}

/// Full output of one scorer invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreOutput {
    /// Corpus-level aggregate, shaped per the metric kind
    pub aggregate: Scores,
    /// Per-item breakdown, one entry per item, same shape as `aggregate`.
    ///
    /// The orchestration layer discards this; it is kept on the contract
    /// for callers that invoke scorers directly.
    pub per_item: Vec<Scores>,
}

impl ScoreOutput {
    /// Aggregate-only output with no per-item breakdown.
    pub fn aggregate_only(aggregate: Scores) -> Self {
        Self {
            aggregate,
            per_item: Vec::new(),
        }
    }
}

/// Uniform scoring contract.
///
/// `compute_score` is called with identical key sets for references and
/// hypotheses; the orchestration layer guarantees this precondition.
/// Scorers may hold internal or external process state, hence `&mut self`
/// — a scorer instance is not reentrant and must not be shared across
/// evaluators.
pub trait Scorer {
    /// Score the hypotheses against the references, returning the
    /// corpus-level aggregate and a per-item breakdown.
    fn compute_score(
        &mut self,
        references: &IndexedText,
        hypotheses: &IndexedText,
    ) -> Result<ScoreOutput>;

    /// Release any held external resource (subprocess, socket, ...).
    ///
    /// Idempotent, and safe to call even if scoring was never invoked.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Factory for the external metric collaborators in the catalog.
///
/// One provider instance configures a whole evaluator; each method must
/// return a fresh scorer so that evaluators never share process state.
pub trait ScorerProvider {
    /// N-gram precision scorer producing cumulative tiers `1..=max_order`.
    fn bleu(&self, max_order: usize) -> Box<dyn Scorer>;
    /// Alignment-based scorer (holds a long-lived external process).
    fn meteor(&self) -> Box<dyn Scorer>;
    /// Longest-common-subsequence recall scorer.
    fn rouge_l(&self) -> Box<dyn Scorer>;
    /// Consensus-based (IDF-weighted) scorer.
    fn cider(&self) -> Box<dyn Scorer>;
    /// Semantic-graph scorer (holds a long-lived external process).
    fn spice(&self) -> Box<dyn Scorer>;
}

/// Scorer returning fixed scores regardless of input.
///
/// Useful for wiring tests and for benchmarking the orchestration layer
/// without real metric backends.
#[derive(Debug, Clone)]
pub struct StaticScorer {
    scores: Scores,
}

impl StaticScorer {
    /// Fixed scalar scorer.
    pub fn scalar(score: f64) -> Self {
        Self {
            scores: Scores::One(score),
        }
    }

    /// Fixed vector scorer with the given ordered sub-scores.
    pub fn vector(scores: &[f64]) -> Self {
        Self {
            scores: Scores::Many(SmallVec::from_slice(scores)),
        }
    }
}

impl Scorer for StaticScorer {
    fn compute_score(
        &mut self,
        references: &IndexedText,
        _hypotheses: &IndexedText,
    ) -> Result<ScoreOutput> {
        Ok(ScoreOutput {
            aggregate: self.scores.clone(),
            per_item: references.keys().map(|_| self.scores.clone()).collect(),
        })
    }
}

/// Provider wiring [`StaticScorer`]s with distinct, in-range values.
///
/// Tier scores decay with order so tests can tell sub-metrics apart.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider;

impl StaticProvider {
    const TIERS: [f64; 4] = [0.8, 0.6, 0.4, 0.2];
}

impl ScorerProvider for StaticProvider {
    fn bleu(&self, max_order: usize) -> Box<dyn Scorer> {
        Box::new(StaticScorer::vector(&Self::TIERS[..max_order]))
    }

    fn meteor(&self) -> Box<dyn Scorer> {
        Box::new(StaticScorer::scalar(0.35))
    }

    fn rouge_l(&self) -> Box<dyn Scorer> {
        Box::new(StaticScorer::scalar(0.55))
    }

    fn cider(&self) -> Box<dyn Scorer> {
        Box::new(StaticScorer::scalar(1.25))
    }

    fn spice(&self) -> Box<dyn Scorer> {
        Box::new(StaticScorer::scalar(0.2))
    }
}
