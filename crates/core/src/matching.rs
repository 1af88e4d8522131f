//! Symptom-to-facility match scoring.
//!
//! A facility's score is the sum, over the reported symptoms, of how many of each symptom's
//! required specialties the facility offers. A specialty that satisfies two symptoms counts
//! once per symptom.

use crate::selection::SymptomSelection;
use crate::taxonomy::SpecialtyTaxonomy;
use catalog::Facility;
use era_types::Distance;
use std::sync::Arc;

/// A facility together with its match score for one request.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredFacility {
    pub facility: Facility,
    pub match_score: u32,
}

impl ScoredFacility {
    /// The facility's distance, carried unchanged from the input.
    pub fn distance(&self) -> Distance {
        self.facility.distance
    }
}

/// Scores facilities against a symptom selection using an injected taxonomy.
#[derive(Clone, Debug)]
pub struct MatchScorer {
    taxonomy: Arc<SpecialtyTaxonomy>,
}

impl MatchScorer {
    pub fn new(taxonomy: Arc<SpecialtyTaxonomy>) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &SpecialtyTaxonomy {
        &self.taxonomy
    }

    /// Match score of `facility` for `symptoms`. Never fails.
    ///
    /// Zero when no symptoms are selected or the facility lists no specialties.
    pub fn score(&self, facility: &Facility, symptoms: &SymptomSelection) -> u32 {
        symptoms.iter().fold(0u32, |total, symptom| {
            let matches = self
                .taxonomy
                .required_specialties(symptom)
                .intersection(&facility.specialties)
                .count();
            total.saturating_add(u32::try_from(matches).unwrap_or(u32::MAX))
        })
    }

    /// Scores one facility, cloning it into a [`ScoredFacility`].
    pub fn score_facility(&self, facility: &Facility, symptoms: &SymptomSelection) -> ScoredFacility {
        ScoredFacility {
            match_score: self.score(facility, symptoms),
            facility: facility.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{facility, selection};

    fn scorer() -> MatchScorer {
        MatchScorer::new(Arc::new(SpecialtyTaxonomy::standard().unwrap()))
    }

    #[test]
    fn counts_required_specialties_present() {
        let scorer = scorer();
        let a = facility("A", &["cardiology", "emergency"], 2.1);
        let b = facility("B", &["trauma", "emergency"], 1.0);
        let symptoms = selection(&["chest_pain"]);

        assert_eq!(scorer.score(&a, &symptoms), 2);
        assert_eq!(scorer.score(&b, &symptoms), 1);
    }

    #[test]
    fn empty_selection_scores_zero() {
        let scorer = scorer();
        let a = facility("A", &["cardiology", "emergency", "trauma"], 2.1);
        assert_eq!(scorer.score(&a, &SymptomSelection::new()), 0);
    }

    #[test]
    fn facility_without_specialties_scores_zero() {
        let scorer = scorer();
        let bare = facility("Bare", &[], 0.5);
        let symptoms = selection(&["chest_pain", "burns", "poisoning"]);
        assert_eq!(scorer.score(&bare, &symptoms), 0);
    }

    #[test]
    fn shared_specialty_counts_once_per_symptom() {
        let scorer = scorer();
        // emergency is required by both chest_pain and severe_bleeding.
        let er = facility("ER", &["emergency"], 1.0);
        let symptoms = selection(&["chest_pain", "severe_bleeding"]);
        assert_eq!(scorer.score(&er, &symptoms), 2);
    }

    #[test]
    fn unknown_symptoms_contribute_nothing() {
        let scorer = scorer();
        let a = facility("A", &["cardiology", "emergency"], 2.1);
        let symptoms = selection(&["hiccups", "chest_pain"]);
        assert_eq!(scorer.score(&a, &symptoms), 2);
    }

    #[test]
    fn superset_of_specialties_never_scores_lower() {
        let scorer = scorer();
        let symptom_sets = [
            selection(&[]),
            selection(&["chest_pain"]),
            selection(&["burns", "fractures"]),
            selection(&["stroke_symptoms", "unconscious", "poisoning"]),
        ];
        let g = facility("G", &["trauma", "neurology"], 1.0);
        let f = facility(
            "F",
            &["trauma", "neurology", "emergency", "burn_unit", "toxicology"],
            1.0,
        );
        for symptoms in &symptom_sets {
            assert!(scorer.score(&f, symptoms) >= scorer.score(&g, symptoms));
        }
    }

    #[test]
    fn score_facility_carries_distance() {
        let scorer = scorer();
        let c = facility("C", &["burn_unit", "trauma"], 4.2);
        let scored = scorer.score_facility(&c, &selection(&["burns"]));
        assert_eq!(scored.match_score, 2);
        assert_eq!(scored.distance().km(), 4.2);
        assert_eq!(scored.facility, c);
    }
}
