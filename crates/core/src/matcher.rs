//! Hospital matching service.
//!
//! Ties the pure scorer and ranker to a [`CoreConfig`], so callers get the configured taxonomy
//! and default result size without threading them through every call.

use crate::config::CoreConfig;
use crate::error::EraResult;
use crate::matching::{MatchScorer, ScoredFacility};
use crate::ranking::{MatchOutcome, Ranker};
use crate::selection::SymptomSelection;
use crate::taxonomy::SpecialtyTaxonomy;
use catalog::Facility;
use era_types::Symptom;
use std::sync::Arc;

/// Pure matching operations - no I/O and no API concerns.
#[derive(Clone, Debug)]
pub struct HospitalMatcher {
    cfg: Arc<CoreConfig>,
    ranker: Ranker,
}

impl HospitalMatcher {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        let ranker = Ranker::new(MatchScorer::new(cfg.taxonomy()));
        Self { cfg, ranker }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    pub fn taxonomy(&self) -> &SpecialtyTaxonomy {
        self.ranker.scorer().taxonomy()
    }

    /// Match score of one facility.
    pub fn score(&self, facility: &Facility, symptoms: &SymptomSelection) -> u32 {
        self.ranker.scorer().score(facility, symptoms)
    }

    /// Rank `facilities`, returning at most `limit` entries (the configured limit if `None`).
    ///
    /// # Errors
    ///
    /// Returns [`crate::EraError::InvalidArgument`] if `limit` is `Some(0)`.
    pub fn rank(
        &self,
        facilities: &[Facility],
        symptoms: &SymptomSelection,
        limit: Option<usize>,
    ) -> EraResult<Vec<ScoredFacility>> {
        self.ranker
            .rank(facilities, symptoms, limit.unwrap_or(self.cfg.rank_limit()))
    }

    /// Like [`Self::rank`], but reports an empty selection as [`MatchOutcome::NoSymptoms`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::EraError::InvalidArgument`] if `limit` is `Some(0)`.
    pub fn recommend(
        &self,
        facilities: &[Facility],
        symptoms: &SymptomSelection,
        limit: Option<usize>,
    ) -> EraResult<MatchOutcome> {
        self.ranker
            .recommend(facilities, symptoms, limit.unwrap_or(self.cfg.rank_limit()))
    }

    /// Symptoms in `symptoms` that the configured taxonomy does not know.
    ///
    /// They are still accepted (and score nothing); callers may want to warn about them.
    pub fn unknown_symptoms<'a>(&self, symptoms: &'a SymptomSelection) -> Vec<&'a Symptom> {
        symptoms
            .iter()
            .filter(|s| !self.taxonomy().is_known(s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{FacilitySource, StaticFacilitySource};
    use crate::test_support::selection;
    use crate::EraError;

    fn matcher() -> HospitalMatcher {
        HospitalMatcher::new(Arc::new(CoreConfig::standard().unwrap()))
    }

    fn standard_facilities() -> Vec<Facility> {
        StaticFacilitySource::standard()
            .unwrap()
            .facilities(None)
            .unwrap()
    }

    #[test]
    fn uses_configured_limit_by_default() {
        let matcher = matcher();
        let ranked = matcher
            .rank(&standard_facilities(), &selection(&["chest_pain"]), None)
            .unwrap();
        assert_eq!(ranked.len(), matcher.config().rank_limit());
    }

    #[test]
    fn explicit_zero_limit_is_rejected() {
        let err = matcher()
            .rank(&standard_facilities(), &selection(&["chest_pain"]), Some(0))
            .unwrap_err();
        assert!(matches!(err, EraError::InvalidArgument(_)));
    }

    #[test]
    fn stroke_prefers_regional_medical_center() {
        let ranked = matcher()
            .rank(&standard_facilities(), &selection(&["stroke_symptoms"]), Some(1))
            .unwrap();
        assert_eq!(ranked[0].facility.name.as_str(), "Regional Medical Center");
        assert_eq!(ranked[0].match_score, 2);
    }

    #[test]
    fn burns_and_fractures_prefer_trauma_center() {
        let ranked = matcher()
            .rank(
                &standard_facilities(),
                &selection(&["burns", "fractures"]),
                None,
            )
            .unwrap();
        assert_eq!(ranked[0].facility.name.as_str(), "Specialized Trauma Center");
        assert_eq!(ranked[0].match_score, 4);
    }

    #[test]
    fn recommend_with_no_symptoms() {
        let outcome = matcher()
            .recommend(&standard_facilities(), &SymptomSelection::new(), None)
            .unwrap();
        assert_eq!(outcome, MatchOutcome::NoSymptoms);
    }

    #[test]
    fn reports_unknown_symptoms() {
        let matcher = matcher();
        let symptoms = selection(&["chest_pain", "hiccups"]);
        let unknown: Vec<&str> = matcher
            .unknown_symptoms(&symptoms)
            .into_iter()
            .map(|s| s.as_str())
            .collect();
        assert_eq!(unknown, vec!["hiccups"]);
    }
}
