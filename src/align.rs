// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Corpus alignment: shaping hypotheses and references for scoring
//!
//! Every scorer consumes the same indexed mapping shape; this module is
//! the single place where raw caller input is trimmed and indexed.

use crate::error::{Error, Result};
use crate::scorer::IndexedText;

/// Aligned corpus: references and hypotheses under identical index sets.
///
/// Both maps are keyed `0..n` in input order. The hypotheses map holds a
/// single-element vector per item, matching the shape scorers expect.
#[derive(Debug, Clone)]
pub struct CorpusAlignment {
    /// Item index to its reference set
    pub references: IndexedText,
    /// Item index to a one-element vector holding its hypothesis
    pub hypotheses: IndexedText,
}

impl CorpusAlignment {
    /// Align a single hypothesis against one reference set (index 0).
    pub fn from_pair<S: AsRef<str>>(references: &[S], hypothesis: &str) -> Result<Self> {
        Self::from_aligned(std::slice::from_ref(&references), &[hypothesis])
    }

    /// Align parallel same-length sequences of reference sets and
    /// hypotheses.
    ///
    /// A length mismatch is a caller precondition violation and fails
    /// before any scorer could run.
    pub fn from_aligned<S: AsRef<str>, H: AsRef<str>>(
        reference_sets: &[impl AsRef<[S]>],
        hypotheses: &[H],
    ) -> Result<Self> {
        if reference_sets.len() != hypotheses.len() {
            return Err(Error::AlignmentMismatch {
                hypotheses: hypotheses.len(),
                references: reference_sets.len(),
            });
        }

        let mut references = IndexedText::new();
        for (idx, refs) in reference_sets.iter().enumerate() {
            let refs = refs.as_ref();
            if refs.is_empty() {
                return Err(Error::EmptyReferenceSet(idx));
            }
            references.insert(idx, refs.iter().map(|r| r.as_ref().trim().to_string()).collect());
        }

        let hypotheses = hypotheses
            .iter()
            .enumerate()
            .map(|(idx, hyp)| (idx, vec![hyp.as_ref().trim().to_string()]))
            .collect();

        Ok(Self {
            references,
            hypotheses,
        })
    }

    /// Align from parallel reference streams (the multi-source corpus
    /// form): `streams[k][i]` is reference source *k*'s line for item *i*.
    /// Position *i* across all streams forms item *i*'s reference set.
    ///
    /// Every stream must be as long as the hypothesis list.
    pub fn from_streams<S: AsRef<str>, H: AsRef<str>>(
        reference_streams: &[impl AsRef<[S]>],
        hypotheses: &[H],
    ) -> Result<Self> {
        for stream in reference_streams {
            if stream.as_ref().len() != hypotheses.len() {
                return Err(Error::AlignmentMismatch {
                    hypotheses: hypotheses.len(),
                    references: stream.as_ref().len(),
                });
            }
        }

        let transposed: Vec<Vec<&str>> = (0..hypotheses.len())
            .map(|i| {
                reference_streams
                    .iter()
                    .map(|stream| stream.as_ref()[i].as_ref())
                    .collect()
            })
            .collect();

        Self::from_aligned(&transposed, hypotheses)
    }

    /// Number of aligned items.
    pub fn len(&self) -> usize {
        self.references.len()
    }

    /// Whether the alignment holds no items.
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pair_indexes_at_zero() {
        let alignment =
            CorpusAlignment::from_pair(&["the cat sat on the mat", "a cat sat"], "the cat sat")
                .unwrap();

        assert_eq!(alignment.len(), 1);
        assert_eq!(alignment.references[&0].len(), 2);
        assert_eq!(alignment.hypotheses[&0], vec!["the cat sat".to_string()]);
    }

    #[test]
    fn test_trimming_on_storage() {
        let alignment =
            CorpusAlignment::from_pair(&["  padded ref \t"], "\n hyp  ").unwrap();

        assert_eq!(alignment.references[&0], vec!["padded ref".to_string()]);
        assert_eq!(alignment.hypotheses[&0], vec!["hyp".to_string()]);
    }

    #[test]
    fn test_trimming_is_idempotent() {
        let once = CorpusAlignment::from_pair(&[" a ref "], " hyp ").unwrap();
        let twice =
            CorpusAlignment::from_pair(&[once.references[&0][0].as_str()], &once.hypotheses[&0][0])
                .unwrap();

        assert_eq!(once.references[&0], twice.references[&0]);
        assert_eq!(once.hypotheses[&0], twice.hypotheses[&0]);
    }

    #[test]
    fn test_aligned_key_sets_match() {
        let refs = vec![vec!["r0a", "r0b"], vec!["r1a"]];
        let alignment = CorpusAlignment::from_aligned(&refs, &["h0", "h1"]).unwrap();

        assert_eq!(alignment.references.len(), alignment.hypotheses.len());
        assert!(alignment
            .references
            .keys()
            .eq(alignment.hypotheses.keys()));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let refs = vec![vec!["r0"], vec!["r1"], vec!["r2"]];
        let err = CorpusAlignment::from_aligned(&refs, &["h0", "h1"]).unwrap_err();

        assert!(matches!(
            err,
            Error::AlignmentMismatch {
                hypotheses: 2,
                references: 3
            }
        ));
    }

    #[test]
    fn test_empty_reference_set_rejected() {
        let refs: Vec<Vec<&str>> = vec![vec!["r0"], vec![]];
        let err = CorpusAlignment::from_aligned(&refs, &["h0", "h1"]).unwrap_err();

        assert!(matches!(err, Error::EmptyReferenceSet(1)));
    }

    #[test]
    fn test_streams_transpose() {
        // Two reference sources, three items each.
        let streams = vec![
            vec!["a0", "a1", "a2"],
            vec!["b0", "b1", "b2"],
        ];
        let alignment =
            CorpusAlignment::from_streams(&streams, &["h0", "h1", "h2"]).unwrap();

        assert_eq!(alignment.len(), 3);
        assert_eq!(
            alignment.references[&1],
            vec!["a1".to_string(), "b1".to_string()]
        );
    }

    #[test]
    fn test_streams_length_mismatch_rejected() {
        let streams = vec![vec!["a0", "a1"], vec!["b0"]];
        let err = CorpusAlignment::from_streams(&streams, &["h0", "h1"]).unwrap_err();

        assert!(matches!(err, Error::AlignmentMismatch { .. }));
    }

    #[test]
    fn test_iteration_matches_input_order() {
        let refs = vec![vec!["r0"], vec!["r1"], vec!["r2"]];
        let alignment = CorpusAlignment::from_aligned(&refs, &["h0", "h1", "h2"]).unwrap();

        let keys: Vec<usize> = alignment.references.keys().copied().collect();
        assert_eq!(keys, vec![0, 1, 2]);
    }
}
