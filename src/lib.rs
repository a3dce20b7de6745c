// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! # Chaejeom - NLG Metric Orchestration
//!
//! Aggregates reference-based text-similarity metrics into a single named
//! score report. Chaejeom is the orchestration layer only: it selects
//! which metrics run, shapes hypothesis/reference data into the indexed
//! form every scorer consumes, invokes each scorer exactly once per
//! evaluation call, and guarantees release of scorers that hold external
//! process state. The scoring mathematics plug in through the [`Scorer`]
//! contract.
//!
//! ## Catalog
//!
//! One vector metric reporting four ordered cumulative tiers
//! (`Bleu_1`..`Bleu_4`) plus four scalar metrics (`METEOR`, `ROUGE_L`,
//! `CIDEr`, `SPICE`). The catalog is closed; configuration is an omission
//! set validated at construction. Omitting tier *i* of the vector metric
//! omits every tier ≥ *i*: the first omitted tier wins, even when the
//! request names only a higher tier. This collapsing rule is authoritative
//! and deliberately tested.
//!
//! ## Quick Start
//!
//! ```
//! use chaejeom::{Evaluator, StaticProvider};
//!
//! // StaticProvider wires fixed-score scorers; real deployments supply
//! // their own ScorerProvider backed by actual metric implementations.
//! let mut evaluator = Evaluator::with_omitted(&StaticProvider, ["SPICE"])?;
//!
//! let report = evaluator.evaluate_pair(
//!     &["the cat sat on the mat", "a cat sat"],
//!     "the cat sat",
//! )?;
//! assert_eq!(report.len(), 7); // four tiers + METEOR + ROUGE_L + CIDEr
//!
//! evaluator.close()?;
//! # Ok::<(), chaejeom::Error>(())
//! ```

#![warn(missing_docs)]

pub mod align;
pub mod error;
pub mod evaluator;
pub mod registry;
pub mod scorer;

pub use align::CorpusAlignment;
pub use error::{Error, Result};
pub use evaluator::{compute_individual_metrics, compute_metrics, Evaluator, ScoreReport};
pub use registry::{valid_metrics, MetricDescriptor, ReportNames, BLEU_TIER_NAMES, SCALAR_METRIC_NAMES};
pub use scorer::{
    IndexedText, ScoreOutput, Scorer, ScorerProvider, Scores, StaticProvider, StaticScorer,
};
