// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Error types for Chaejeom

use thiserror::Error;

/// Result type alias for Chaejeom operations
pub type Result<T> = core::result::Result<T, Error>;

/// Main error type for the Chaejeom library
#[derive(Error, Debug)]
pub enum Error {
    /// An omission set named a metric outside the closed catalog.
    ///
    /// Raised at evaluator construction, before any scorer is built.
    #[error("Unknown metric in omission set: {0:?}")]
    UnknownMetric(String),

    /// Hypothesis count and reference-set count disagree.
    ///
    /// This is a caller precondition violation and is raised before any
    /// metric runs.
    #[error("Alignment mismatch: {hypotheses} hypotheses vs {references} reference sets")]
    AlignmentMismatch {
        /// Number of hypotheses supplied
        hypotheses: usize,
        /// Number of reference sets supplied
        references: usize,
    },

    /// A reference set contained no references.
    #[error("Empty reference set for item {0}")]
    EmptyReferenceSet(usize),

    /// A scorer returned a different number of scores than its declared
    /// sub-metric names.
    #[error("Scorer for {name} returned {got} scores, expected {expected}")]
    ScoreShape {
        /// First declared name of the offending metric
        name: &'static str,
        /// Number of declared sub-metric names
        expected: usize,
        /// Number of scores actually returned
        got: usize,
    },

    /// Failure inside an external scorer's computation
    #[error("Scorer error: {0}")]
    Scorer(String),

    /// I/O errors (external scorers talking to subprocesses, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a scorer error
    pub fn scorer(msg: impl Into<String>) -> Self {
        Self::Scorer(msg.into())
    }

    /// Check if this is a configuration error (bad omission set).
    #[inline]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::UnknownMetric(_))
    }

    /// Get the error category for logging/metrics.
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnknownMetric(_) => "config",
            Self::AlignmentMismatch { .. } => "alignment",
            Self::EmptyReferenceSet(_) => "alignment",
            Self::ScoreShape { .. } => "shape",
            Self::Scorer(_) => "scorer",
            Self::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_metric_message() {
        let err = Error::UnknownMetric("Bleu_5".to_string());
        assert!(err.is_config_error());
        assert_eq!(err.to_string(), "Unknown metric in omission set: \"Bleu_5\"");
    }

    #[test]
    fn test_alignment_mismatch_message() {
        let err = Error::AlignmentMismatch {
            hypotheses: 3,
            references: 2,
        };
        assert!(!err.is_config_error());
        assert_eq!(
            err.to_string(),
            "Alignment mismatch: 3 hypotheses vs 2 reference sets"
        );
    }

    #[test]
    fn test_scorer_constructor() {
        let err = Error::scorer("subprocess died");
        assert!(matches!(err, Error::Scorer(_)));
        assert_eq!(err.category(), "scorer");
    }

    #[test]
    fn test_category() {
        assert_eq!(Error::UnknownMetric("x".into()).category(), "config");
        assert_eq!(Error::EmptyReferenceSet(0).category(), "alignment");
        assert_eq!(
            Error::ScoreShape {
                name: "Bleu_1",
                expected: 4,
                got: 2
            }
            .category(),
            "shape"
        );
    }
}
