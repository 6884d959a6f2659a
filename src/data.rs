//! Statistical observations and their lookup by entity id.

use std::{collections::{HashMap, hash_map::Entry}, fmt};
use serde::Deserialize;
use tracing::warn;

/// Identifier joining geometries and observations (e.g. a FIPS code).
///
/// Numbers and strings of digits (possibly followed by a decimal part
/// of zeros) are normalized to the same decimal form, so `1001`,
/// `1001.0`, `"01001"` and `"1001.0"` are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "RawId")]
pub struct Id(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Num(serde_json::Number),
    Str(String),
}

impl From<RawId> for Id {
    fn from(raw: RawId) -> Id {
        match raw {
            RawId::Num(n) => {
                if let Some(i) = n.as_i64() { Id(i.to_string()) }
                else if let Some(u) = n.as_u64() { Id(u.to_string()) }
                else {
                    match n.as_f64() {
                        Some(x) if x.fract() == 0. && x.abs() < 1e15 =>
                            Id((x as i64).to_string()),
                        _ => Id(n.to_string()),
                    }
                }
            }
            RawId::Str(s) => Id::from(s.as_str()),
        }
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Id {
        let s = s.trim();
        let digits = |t: &str| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit());
        let int = match s.split_once('.') {
            Some((int, frac)) if frac.bytes().all(|b| b == b'0') => int,
            _ => s,
        };
        if digits(int) {
            if let Ok(n) = int.parse::<u64>() { return Id(n.to_string()) }
        }
        Id(s.to_string())
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Id { Id(n.to_string()) }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of statistical data.  The field names accepted are those
/// of the county education dataset, or the generic ones.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Observation {
    #[serde(alias = "fips")]
    pub id: Id,
    #[serde(alias = "bachelorsOrHigher")]
    pub value: f64,
    #[serde(alias = "area_name", default)]
    pub label: String,
    #[serde(alias = "state", default)]
    pub region: String,
}

impl Observation {
    /// Text shown when hovering the entity: `{label}, {region}: {value}%`.
    pub fn tooltip(&self) -> String {
        format!("{}, {}: {}%", self.label, self.region, self.value)
    }
}

/// Observations indexed by [`Id`].  When an id occurs more than once
/// the first observation is kept.
#[derive(Debug, Clone, Default)]
pub struct ObservationIndex {
    observations: Vec<Observation>,
    by_id: HashMap<Id, usize>,
}

impl ObservationIndex {
    pub fn new(observations: Vec<Observation>) -> Self {
        let mut by_id = HashMap::with_capacity(observations.len());
        for (i, obs) in observations.iter().enumerate() {
            match by_id.entry(obs.id.clone()) {
                Entry::Vacant(e) => { e.insert(i); }
                Entry::Occupied(e) => {
                    warn!(id = %obs.id, kept = *e.get(), ignored = i,
                          "duplicate observation id");
                }
            }
        }
        ObservationIndex { observations, by_id }
    }

    pub fn get(&self, id: &Id) -> Option<&Observation> {
        self.by_id.get(id).map(|&i| &self.observations[i])
    }

    /// All observations, duplicates included, in input order.
    pub fn observations(&self) -> &[Observation] { &self.observations }

    /// The values of all observations.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().map(|o| o.value)
    }

    pub fn len(&self) -> usize { self.observations.len() }

    pub fn is_empty(&self) -> bool { self.observations.is_empty() }
}
