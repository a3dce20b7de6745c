// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Metric catalog and omission resolution
//!
//! The catalog is fixed and closed: one vector metric reporting four
//! ordered cumulative tiers, plus four independent scalar metrics. An
//! omission set is resolved once, at construction, into the ordered
//! Active Metric List the evaluator runs.

use crate::error::{Error, Result};
use crate::scorer::{Scorer, ScorerProvider};
use smallvec::SmallVec;
use std::collections::BTreeSet;

/// Report names of the vector metric's tiers, in rank order.
pub const BLEU_TIER_NAMES: [&str; 4] = ["Bleu_1", "Bleu_2", "Bleu_3", "Bleu_4"];

/// Report names of the four independent scalar metrics.
pub const SCALAR_METRIC_NAMES: [&str; 4] = ["METEOR", "ROUGE_L", "CIDEr", "SPICE"];

/// All recognized sub-metric names.
pub fn valid_metrics() -> BTreeSet<&'static str> {
    BLEU_TIER_NAMES
        .iter()
        .chain(SCALAR_METRIC_NAMES.iter())
        .copied()
        .collect()
}

/// Report names declared by one metric descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportNames {
    /// Single name of a scalar metric
    Scalar(&'static str),
    /// Ordered names of a vector metric's sub-scores
    Vector(SmallVec<[&'static str; 4]>),
}

impl ReportNames {
    /// Declared names in report order.
    pub fn names(&self) -> &[&'static str] {
        match self {
            Self::Scalar(name) => std::slice::from_ref(name),
            Self::Vector(names) => names,
        }
    }
}

/// One entry of the Active Metric List: a scorer plus its declared
/// report names.
///
/// Dropping a descriptor releases the scorer best-effort; `close` is
/// idempotent per the scoring contract, so an earlier explicit release
/// makes this a no-op.
pub struct MetricDescriptor {
    pub(crate) scorer: Box<dyn Scorer>,
    pub(crate) names: ReportNames,
}

impl MetricDescriptor {
    /// Declared report names in execution order.
    pub fn names(&self) -> &[&'static str] {
        self.names.names()
    }
}

impl Drop for MetricDescriptor {
    fn drop(&mut self) {
        if let Err(_err) = self.scorer.close() {
            #[cfg(feature = "tracing")]
            tracing::warn!(metric = self.names()[0], error = %_err, "scorer release failed on drop");
        }
    }
}

impl std::fmt::Debug for MetricDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricDescriptor")
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

/// Omission set resolved into a concrete metric selection.
///
/// Tier count plus four inclusion flags; computed once and reused for
/// every evaluation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolvedMetrics {
    /// Number of vector-metric tiers to keep (0..=4)
    pub bleu_tiers: usize,
    pub meteor: bool,
    pub rouge_l: bool,
    pub cider: bool,
    pub spice: bool,
}

impl ResolvedMetrics {
    /// Resolve an omission set against the closed catalog.
    ///
    /// The first omitted tier wins: omitting tier *i* collapses the
    /// vector metric to tiers `1..i-1` regardless of what higher tiers
    /// the set also names, and a request to omit only a higher tier
    /// still collapses at that tier. This matches the documented
    /// lower-tier-wins rule; see the crate docs for the rationale.
    pub fn resolve<I, S>(omit: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let omit: BTreeSet<String> = omit.into_iter().map(|s| s.as_ref().to_string()).collect();

        let valid = valid_metrics();
        for name in &omit {
            if !valid.contains(name.as_str()) {
                return Err(Error::UnknownMetric(name.clone()));
            }
        }

        let mut bleu_tiers = BLEU_TIER_NAMES.len();
        for (i, tier) in BLEU_TIER_NAMES.iter().enumerate() {
            if omit.contains(*tier) {
                bleu_tiers = i;
                break;
            }
        }

        Ok(Self {
            bleu_tiers,
            meteor: !omit.contains(SCALAR_METRIC_NAMES[0]),
            rouge_l: !omit.contains(SCALAR_METRIC_NAMES[1]),
            cider: !omit.contains(SCALAR_METRIC_NAMES[2]),
            spice: !omit.contains(SCALAR_METRIC_NAMES[3]),
        })
    }

    /// Materialize the Active Metric List through the provider.
    pub fn load(&self, provider: &dyn ScorerProvider) -> Vec<MetricDescriptor> {
        let mut descriptors = Vec::with_capacity(5);

        if self.bleu_tiers > 0 {
            descriptors.push(MetricDescriptor {
                scorer: provider.bleu(self.bleu_tiers),
                names: ReportNames::Vector(SmallVec::from_slice(
                    &BLEU_TIER_NAMES[..self.bleu_tiers],
                )),
            });
        }
        if self.meteor {
            descriptors.push(MetricDescriptor {
                scorer: provider.meteor(),
                names: ReportNames::Scalar(SCALAR_METRIC_NAMES[0]),
            });
        }
        if self.rouge_l {
            descriptors.push(MetricDescriptor {
                scorer: provider.rouge_l(),
                names: ReportNames::Scalar(SCALAR_METRIC_NAMES[1]),
            });
        }
        if self.cider {
            descriptors.push(MetricDescriptor {
                scorer: provider.cider(),
                names: ReportNames::Scalar(SCALAR_METRIC_NAMES[2]),
            });
        }
        if self.spice {
            descriptors.push(MetricDescriptor {
                scorer: provider.spice(),
                names: ReportNames::Scalar(SCALAR_METRIC_NAMES[3]),
            });
        }

        descriptors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::StaticProvider;

    fn resolve(omit: &[&str]) -> ResolvedMetrics {
        ResolvedMetrics::resolve(omit.iter().copied()).unwrap()
    }

    #[test]
    fn test_no_omissions_keeps_full_catalog() {
        let resolved = resolve(&[]);
        assert_eq!(resolved.bleu_tiers, 4);
        assert!(resolved.meteor && resolved.rouge_l && resolved.cider && resolved.spice);

        let descriptors = resolved.load(&StaticProvider);
        assert_eq!(descriptors.len(), 5);
        assert_eq!(descriptors[0].names(), &BLEU_TIER_NAMES);
    }

    #[test]
    fn test_omission_cascade_per_tier() {
        for (i, tier) in BLEU_TIER_NAMES.iter().copied().enumerate() {
            let resolved = resolve(&[tier]);
            assert_eq!(resolved.bleu_tiers, i, "omitting {tier}");

            let descriptors = resolved.load(&StaticProvider);
            let expected = if i == 0 { 4 } else { 5 };
            assert_eq!(descriptors.len(), expected);
            if i > 0 {
                assert_eq!(descriptors[0].names(), &BLEU_TIER_NAMES[..i]);
            }
        }
    }

    #[test]
    fn test_higher_tier_omission_collapses() {
        // Omitting only tier 3 still drops tier 4: the first omitted
        // tier wins even when lower tiers were not requested omitted.
        let resolved = resolve(&["Bleu_3"]);
        assert_eq!(resolved.bleu_tiers, 2);

        let descriptors = resolved.load(&StaticProvider);
        assert_eq!(descriptors[0].names(), &["Bleu_1", "Bleu_2"]);
    }

    #[test]
    fn test_scalar_omission_is_independent() {
        let resolved = resolve(&["ROUGE_L", "SPICE"]);
        assert_eq!(resolved.bleu_tiers, 4);
        assert!(resolved.meteor);
        assert!(!resolved.rouge_l);
        assert!(resolved.cider);
        assert!(!resolved.spice);

        let descriptors = resolved.load(&StaticProvider);
        let names: Vec<&str> = descriptors.iter().flat_map(|d| d.names()).copied().collect();
        assert_eq!(
            names,
            vec!["Bleu_1", "Bleu_2", "Bleu_3", "Bleu_4", "METEOR", "CIDEr"]
        );
    }

    #[test]
    fn test_omit_everything() {
        let all: Vec<&str> = valid_metrics().into_iter().collect();
        let resolved = ResolvedMetrics::resolve(all).unwrap();
        assert_eq!(resolved.load(&StaticProvider).len(), 0);
    }

    #[test]
    fn test_unknown_metric_rejected() {
        let err = ResolvedMetrics::resolve(["Bleu_5"]).unwrap_err();
        assert!(matches!(err, Error::UnknownMetric(name) if name == "Bleu_5"));

        let err = ResolvedMetrics::resolve(["meteor"]).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_unknown_rejected_even_with_valid_names() {
        // No partial configuration: one bad name fails the whole set.
        let err = ResolvedMetrics::resolve(["METEOR", "bogus"]).unwrap_err();
        assert!(matches!(err, Error::UnknownMetric(name) if name == "bogus"));
    }

    #[test]
    fn test_valid_metrics_catalog() {
        let valid = valid_metrics();
        assert_eq!(valid.len(), 8);
        assert!(valid.contains("Bleu_1"));
        assert!(valid.contains("SPICE"));
    }
}
