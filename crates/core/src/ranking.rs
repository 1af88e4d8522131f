//! Ranking of scored facilities.
//!
//! Ordering is a composite key: match score descending, then distance ascending. The sort is
//! stable, so facilities tied on both keys keep their input order and the output is fully
//! determined by the input.

use crate::error::{EraError, EraResult};
use crate::matching::{MatchScorer, ScoredFacility};
use crate::selection::SymptomSelection;
use catalog::Facility;
use std::cmp::Ordering;

/// Result of a recommendation request.
#[derive(Clone, Debug, PartialEq)]
pub enum MatchOutcome {
    /// No symptoms were selected; callers should prompt for symptoms rather than show a list.
    NoSymptoms,
    /// Ranked facilities, best first.
    Ranked(Vec<ScoredFacility>),
}

/// Composite ranking order: higher score first, then nearer first.
pub fn ranking_order(a: &ScoredFacility, b: &ScoredFacility) -> Ordering {
    b.match_score
        .cmp(&a.match_score)
        .then_with(|| a.distance().cmp(&b.distance()))
}

#[derive(Clone, Debug)]
pub struct Ranker {
    scorer: MatchScorer,
}

impl Ranker {
    pub fn new(scorer: MatchScorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &MatchScorer {
        &self.scorer
    }

    /// Scores, sorts and truncates `facilities` to at most `limit` entries.
    ///
    /// An empty selection is still ranked: every score is zero so the result is ordered purely
    /// by distance.
    ///
    /// # Errors
    ///
    /// Returns [`EraError::InvalidArgument`] if `limit` is zero. No partial result is produced.
    pub fn rank(
        &self,
        facilities: &[Facility],
        symptoms: &SymptomSelection,
        limit: usize,
    ) -> EraResult<Vec<ScoredFacility>> {
        if limit == 0 {
            return Err(EraError::InvalidArgument(
                "rank limit must be greater than zero".into(),
            ));
        }

        let mut scored: Vec<ScoredFacility> = facilities
            .iter()
            .map(|f| self.scorer.score_facility(f, symptoms))
            .collect();

        // slice::sort_by is stable.
        scored.sort_by(ranking_order);
        scored.truncate(limit);

        tracing::debug!(
            "ranked {} facilities for {} symptoms, returning {}",
            facilities.len(),
            symptoms.len(),
            scored.len()
        );

        Ok(scored)
    }

    /// Like [`Self::rank`], but reports an empty selection as [`MatchOutcome::NoSymptoms`].
    ///
    /// # Errors
    ///
    /// Returns [`EraError::InvalidArgument`] if `limit` is zero, whether or not symptoms were
    /// selected.
    pub fn recommend(
        &self,
        facilities: &[Facility],
        symptoms: &SymptomSelection,
        limit: usize,
    ) -> EraResult<MatchOutcome> {
        let ranked = self.rank(facilities, symptoms, limit)?;
        if symptoms.is_empty() {
            return Ok(MatchOutcome::NoSymptoms);
        }
        Ok(MatchOutcome::Ranked(ranked))
    }
}
