//! Normalised identifiers for symptoms and specialties.
//!
//! Both are lower-case snake_case keys (`chest_pain`, `burn_unit`). Construction trims the
//! input, lower-cases it and folds spaces and hyphens to `_`, so `"Burn Unit"` and `"burn-unit"`
//! name the same specialty.

use crate::TextError;
use std::fmt;
use std::str::FromStr;

fn normalise(input: &str) -> Result<String, TextError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TextError::Empty);
    }

    let normalised: String = trimmed
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect();

    let ok = normalised
        .bytes()
        .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'_'));
    if !ok {
        return Err(TextError::InvalidIdentifier(trimmed.to_owned()));
    }

    Ok(normalised)
}

/// A reported medical symptom, e.g. `chest_pain`.
///
/// Any well-formed identifier is a valid symptom. Whether it is *known* is a question for the
/// configured taxonomy, which maps unknown symptoms to no specialties at all.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symptom(String);

/// A medical capability a facility offers, e.g. `cardiology`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specialty(String);

impl Symptom {
    /// Creates a symptom identifier from user or file input.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Empty`] for blank input and [`TextError::InvalidIdentifier`] when
    /// the normalised text contains anything other than `a-z`, `0-9` or `_`.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        normalise(input.as_ref()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Specialty {
    /// Creates a specialty identifier from user or file input.
    ///
    /// # Errors
    ///
    /// Same rules as [`Symptom::new`].
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        normalise(input.as_ref()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable form, `burn_unit` becomes `burn unit`.
    pub fn display_name(&self) -> String {
        self.0.replace('_', " ")
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symptom {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl FromStr for Specialty {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Symptom {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Specialty {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for Symptom {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Symptom {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Symptom::new(&s).map_err(serde::de::Error::custom)
    }
}

impl serde::Serialize for Specialty {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Specialty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Specialty::new(&s).map_err(serde::de::Error::custom)
    }
}
