//! Overlap detection for time-ranged assignments.
//!
//! An item can be assigned to one person or location at a time. Before an
//! assignment is saved, the proposed range is checked against the existing
//! ones. Boundaries are inclusive: two ranges that share a single instant
//! collide. A missing end means the assignment is still active and extends
//! to infinity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A time range owned by one assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentInterval {
    pub id: String,
    pub assigned_from: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_until: Option<DateTime<Utc>>,
}

impl AssignmentInterval {
    pub fn new(
        id: impl Into<String>,
        assigned_from: DateTime<Utc>,
        assigned_until: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: id.into(),
            assigned_from,
            assigned_until,
        }
    }

    /// Whether the range has no end.
    pub fn is_open_ended(&self) -> bool {
        self.assigned_until.is_none()
    }

    /// Whether `[from, until]` intersects this range (inclusive, open ends
    /// extend to infinity).
    pub fn overlaps(&self, from: DateTime<Utc>, until: Option<DateTime<Utc>>) -> bool {
        let starts_before_candidate_ends = until.map_or(true, |u| self.assigned_from <= u);
        let ends_after_candidate_starts = self.assigned_until.map_or(true, |u| u >= from);
        starts_before_candidate_ends && ends_after_candidate_starts
    }
}

/// Whether the candidate range overlaps any interval in `existing` other than
/// the one whose id equals `exclude_id`.
pub fn has_overlap(
    candidate_from: DateTime<Utc>,
    candidate_until: Option<DateTime<Utc>>,
    existing: &[AssignmentInterval],
    exclude_id: Option<&str>,
) -> bool {
    existing
        .iter()
        .filter(|interval| Some(interval.id.as_str()) != exclude_id)
        .any(|interval| interval.overlaps(candidate_from, candidate_until))
}

/// All intervals in `existing` that collide with the candidate range, in
/// input order.
pub fn find_overlaps<'a>(
    candidate_from: DateTime<Utc>,
    candidate_until: Option<DateTime<Utc>>,
    existing: &'a [AssignmentInterval],
    exclude_id: Option<&str>,
) -> Vec<&'a AssignmentInterval> {
    existing
        .iter()
        .filter(|interval| Some(interval.id.as_str()) != exclude_id)
        .filter(|interval| interval.overlaps(candidate_from, candidate_until))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn january() -> AssignmentInterval {
        AssignmentInterval::new("a-1", day(2024, 1, 10), Some(day(2024, 1, 20)))
    }

    #[test]
    fn test_empty_collection_never_overlaps() {
        assert!(!has_overlap(day(2024, 1, 1), None, &[], None));
    }

    #[test]
    fn test_shared_end_boundary_overlaps() {
        let existing = vec![january()];
        assert!(has_overlap(
            day(2024, 1, 20),
            Some(day(2024, 1, 25)),
            &existing,
            None
        ));
    }

    #[test]
    fn test_shared_start_boundary_overlaps() {
        let existing = vec![january()];
        assert!(has_overlap(
            day(2024, 1, 5),
            Some(day(2024, 1, 10)),
            &existing,
            None
        ));
    }

    #[test]
    fn test_disjoint_ranges_do_not_overlap() {
        let existing = vec![january()];
        assert!(!has_overlap(
            day(2024, 1, 21),
            Some(day(2024, 1, 25)),
            &existing,
            None
        ));
        assert!(!has_overlap(
            day(2023, 12, 1),
            Some(day(2024, 1, 9)),
            &existing,
            None
        ));
    }

    #[test]
    fn test_excluded_id_never_counts() {
        let existing = vec![january()];
        assert!(!has_overlap(
            day(2024, 1, 10),
            Some(day(2024, 1, 20)),
            &existing,
            Some("a-1")
        ));
    }

    #[test]
    fn test_exclusion_only_skips_matching_id() {
        let existing = vec![
            january(),
            AssignmentInterval::new("a-2", day(2024, 1, 15), Some(day(2024, 1, 16))),
        ];
        assert!(has_overlap(
            day(2024, 1, 10),
            Some(day(2024, 1, 20)),
            &existing,
            Some("a-1")
        ));
    }

    #[test]
    fn test_open_ended_existing_overlaps_future_candidate() {
        let existing = vec![AssignmentInterval::new("a-1", day(2024, 1, 1), None)];
        assert!(has_overlap(
            day(2025, 1, 1),
            Some(day(2025, 2, 1)),
            &existing,
            None
        ));
    }

    #[test]
    fn test_open_ended_candidate_overlaps_later_existing() {
        let existing = vec![january()];
        assert!(has_overlap(day(2023, 6, 1), None, &existing, None));
    }

    #[test]
    fn test_open_ended_candidate_after_closed_existing() {
        let existing = vec![january()];
        assert!(!has_overlap(day(2024, 2, 1), None, &existing, None));
    }

    #[test]
    fn test_both_open_ended_always_overlap() {
        let existing = vec![AssignmentInterval::new("a-1", day(2030, 1, 1), None)];
        assert!(has_overlap(day(2020, 1, 1), None, &existing, None));
    }

    #[test]
    fn test_find_overlaps_names_conflicts() {
        let existing = vec![
            january(),
            AssignmentInterval::new("a-2", day(2024, 3, 1), None),
            AssignmentInterval::new("a-3", day(2024, 1, 18), Some(day(2024, 1, 19))),
        ];
        let conflicts = find_overlaps(day(2024, 1, 19), Some(day(2024, 2, 1)), &existing, None);
        let ids: Vec<&str> = conflicts.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a-1", "a-3"]);
    }

    #[test]
    fn test_interval_deserializes_without_until() {
        let interval: AssignmentInterval =
            serde_json::from_str(r#"{"id":"x","assignedFrom":"2024-01-01T00:00:00Z"}"#).unwrap();
        assert!(interval.is_open_ended());
    }
}
