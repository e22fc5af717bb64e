//! Named cohort of subjects keyed by identifier
//!
//! A `Cohort` keeps identifiers and ages as parallel arrays in first-insertion
//! order, with a hash index for identifier lookups. The order is the row order
//! the matcher uses when building its cost matrix.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CohortMatchError, Result};

/// Mapping from subject identifier to age
#[derive(Debug, Clone, Default)]
pub struct Cohort {
    name: String,
    ids: Vec<String>,
    ages: Vec<f64>,
    positions: FxHashMap<String, usize>,
}

impl Cohort {
    /// Create an empty cohort with the given name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build a cohort from `(identifier, age)` pairs; later repeats overwrite earlier ones
    pub fn from_pairs<I, S>(name: impl Into<String>, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut cohort = Self::new(name);
        for (id, age) in pairs {
            cohort.insert(id, age)?;
        }
        Ok(cohort)
    }

    /// Insert or overwrite a subject's age
    ///
    /// An overwrite keeps the subject's original position. Returns the
    /// previous age when the identifier was already present.
    pub fn insert(&mut self, id: impl Into<String>, age: f64) -> Result<Option<f64>> {
        let id = id.into();
        if !age.is_finite() {
            return Err(CohortMatchError::InvalidAge {
                cohort: self.name.clone(),
                subject: id,
                age,
            });
        }

        if let Some(&pos) = self.positions.get(&id) {
            let previous = std::mem::replace(&mut self.ages[pos], age);
            return Ok(Some(previous));
        }

        self.positions.insert(id.clone(), self.ids.len());
        self.ids.push(id);
        self.ages.push(age);
        Ok(None)
    }

    /// Cohort name used in reports and errors
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Age of a subject, if present
    #[must_use]
    pub fn get(&self, id: &str) -> Option<f64> {
        self.positions.get(id).map(|&pos| self.ages[pos])
    }

    /// Whether the cohort contains the identifier
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Identifiers in cohort order
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Ages in cohort order, parallel to [`Cohort::ids`]
    #[must_use]
    pub fn ages(&self) -> &[f64] {
        &self.ages
    }

    /// Iterate over `(identifier, age)` in cohort order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.ids.iter().map(String::as_str).zip(self.ages.iter().copied())
    }

    /// Number of subjects
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if the cohort is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Serialize for Cohort {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (id, age) in self.iter() {
            map.serialize_entry(id, &age)?;
        }
        map.end()
    }
}

struct CohortVisitor;

impl<'de> Visitor<'de> for CohortVisitor {
    type Value = Cohort;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of subject identifiers to ages")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut cohort = Cohort::new("controls");
        while let Some((id, age)) = access.next_entry::<String, f64>()? {
            if cohort.contains(&id) {
                let message = format!("duplicate subject {id}");
                return Err(<A::Error as de::Error>::custom(message));
            }
            cohort.insert(id, age).map_err(<A::Error as de::Error>::custom)?;
        }
        Ok(cohort)
    }
}

/// Deserializes from a JSON object, keeping the entries in file order.
/// The name defaults to `controls`.
impl<'de> Deserialize<'de> for Cohort {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(CohortVisitor)
    }
}
