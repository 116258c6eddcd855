//! Novelty and conventionality scoring (unsupported)
//!
//! Uzzi et al.'s atypical-combinations measure needs an ensemble of
//! randomized citation networks that this engine does not build. The entry
//! point exists so callers get a clear unsupported-operation report instead
//! of a silent approximation or a mid-pipeline failure.

use imcite_relations::{CitationCorpus, Id, Year};
use serde::{Deserialize, Serialize};

use crate::error::{MetricError, MetricResult};

/// Per-publication novelty/conventionality, were it computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoveltyScore {
    pub publication: Id,
    pub year: Year,
    pub novelty: f64,
    pub conventionality: f64,
}

/// Always reports [`MetricError::UnsupportedOperation`].
pub fn novelty_conventionality(
    _corpus: &CitationCorpus,
    _focus: Option<&[Id]>,
) -> MetricResult<Vec<NoveltyScore>> {
    Err(MetricError::UnsupportedOperation(
        "novelty/conventionality scoring",
    ))
}
