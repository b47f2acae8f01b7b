//! The set of days a habit was completed.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::date::{normalize, CompletionDate, IntoCompletionDate};
use crate::error::DateError;
use crate::period::PeriodWindow;

/// Deduplicated, chronologically ordered completion days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionSet {
    dates: BTreeSet<CompletionDate>,
}

impl CompletionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalise every input. The first malformed entry aborts the whole set.
    ///
    /// # Errors
    ///
    /// Returns the [`DateError`] of the first input that cannot be normalised.
    pub fn try_from_inputs<I, T>(inputs: I) -> Result<Self, DateError>
    where
        I: IntoIterator<Item = T>,
        T: IntoCompletionDate,
    {
        let dates = inputs
            .into_iter()
            .map(normalize)
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self { dates })
    }

    /// Build from a `day -> completed` map; only `true` entries count.
    ///
    /// # Errors
    ///
    /// Returns a [`DateError`] when a completed key is not a valid date.
    pub fn from_completion_map(map: &HashMap<String, bool>) -> Result<Self, DateError> {
        Self::try_from_inputs(map.iter().filter(|(_, done)| **done).map(|(day, _)| day))
    }

    /// Insert a day. Returns `false` if it was already present.
    pub fn insert(&mut self, date: CompletionDate) -> bool {
        self.dates.insert(date)
    }

    pub fn contains(&self, date: CompletionDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = CompletionDate> + '_ {
        self.dates.iter().copied()
    }

    /// Newest first.
    pub fn iter_desc(&self) -> impl Iterator<Item = CompletionDate> + '_ {
        self.dates.iter().rev().copied()
    }

    pub fn latest(&self) -> Option<CompletionDate> {
        self.dates.last().copied()
    }

    /// Number of days inside `window`, bounds inclusive.
    pub fn count_in(&self, window: &PeriodWindow) -> usize {
        if window.start > window.end {
            return 0;
        }
        self.dates.range(window.start..=window.end).count()
    }
}

impl FromIterator<CompletionDate> for CompletionSet {
    fn from_iter<I: IntoIterator<Item = CompletionDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

impl Extend<CompletionDate> for CompletionSet {
    fn extend<I: IntoIterator<Item = CompletionDate>>(&mut self, iter: I) {
        self.dates.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_collapse() {
        let set = CompletionSet::try_from_inputs([
            "2024-03-12",
            "2024-03-12T08:00:00",
            "2024-03-12 21:30:00",
            "2024-03-11",
        ])
        .unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn ordering_is_chronological_both_ways() {
        let set = CompletionSet::try_from_inputs(["2024-03-12", "2024-01-01", "2024-02-15"]).unwrap();
        let asc: Vec<String> = set.iter().map(|d| d.to_string()).collect();
        assert_eq!(asc, ["2024-01-01", "2024-02-15", "2024-03-12"]);
        let desc: Vec<String> = set.iter_desc().map(|d| d.to_string()).collect();
        assert_eq!(desc, ["2024-03-12", "2024-02-15", "2024-01-01"]);
        assert_eq!(set.latest().unwrap().to_string(), "2024-03-12");
    }

    #[test]
    fn bad_input_is_propagated_not_dropped() {
        let err = CompletionSet::try_from_inputs(["2024-03-12", "not-a-date"]).unwrap_err();
        assert!(matches!(err, DateError::Invalid { ref input, .. } if input == "not-a-date"));
    }

    #[test]
    fn completion_map_keeps_only_true_entries() {
        let mut map = HashMap::new();
        map.insert("2024-03-10".to_string(), true);
        map.insert("2024-03-11".to_string(), false);
        map.insert("2024-03-12".to_string(), true);
        let set = CompletionSet::from_completion_map(&map).unwrap();
        assert_eq!(set.len(), 2);
        assert!(!set.contains("2024-03-11".parse().unwrap()));
    }

    #[test]
    fn unchecked_bad_keys_are_ignored() {
        let mut map = HashMap::new();
        map.insert("garbage".to_string(), false);
        map.insert("2024-03-12".to_string(), true);
        assert_eq!(CompletionSet::from_completion_map(&map).unwrap().len(), 1);
    }

    #[test]
    fn count_in_window_is_inclusive() {
        let set = CompletionSet::try_from_inputs(["2024-03-09", "2024-03-10", "2024-03-16", "2024-03-17"])
            .unwrap();
        let window = PeriodWindow {
            start: "2024-03-10".parse().unwrap(),
            end: "2024-03-16".parse().unwrap(),
        };
        assert_eq!(set.count_in(&window), 2);
        let inverted = PeriodWindow {
            start: window.end,
            end: window.start,
        };
        assert_eq!(set.count_in(&inverted), 0);
    }
}
