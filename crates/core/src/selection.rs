//! The set of symptoms reported for one matching request.

use era_types::Symptom;

/// Symptoms currently reported by the caller.
///
/// Behaves as a set (adding a symptom twice has no effect) but remembers the order in which
/// symptoms were first selected, so lists echo back the way the caller built them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymptomSelection {
    symptoms: Vec<Symptom>,
}

impl SymptomSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `symptom`. Returns `false` if it was already selected.
    pub fn insert(&mut self, symptom: Symptom) -> bool {
        if self.contains(&symptom) {
            return false;
        }
        self.symptoms.push(symptom);
        true
    }

    /// Removes `symptom`. Returns `false` if it was not selected.
    pub fn remove(&mut self, symptom: &Symptom) -> bool {
        let before = self.symptoms.len();
        self.symptoms.retain(|s| s != symptom);
        self.symptoms.len() != before
    }

    /// Checkbox semantics: deselect if selected, otherwise select.
    ///
    /// Returns whether the symptom is selected afterwards.
    pub fn toggle(&mut self, symptom: Symptom) -> bool {
        if self.remove(&symptom) {
            false
        } else {
            self.symptoms.push(symptom);
            true
        }
    }

    pub fn contains(&self, symptom: &Symptom) -> bool {
        self.symptoms.contains(symptom)
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symptom> {
        self.symptoms.iter()
    }
}

impl FromIterator<Symptom> for SymptomSelection {
    fn from_iter<I: IntoIterator<Item = Symptom>>(iter: I) -> Self {
        let mut selection = Self::new();
        for symptom in iter {
            selection.insert(symptom);
        }
        selection
    }
}

impl<'a> IntoIterator for &'a SymptomSelection {
    type Item = &'a Symptom;
    type IntoIter = std::slice::Iter<'a, Symptom>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
