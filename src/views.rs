//! Derived views over a case snapshot.
//!
//! Everything here is a pure function of its arguments, recomputed on
//! demand and never cached. `today` is injected by the caller so the views
//! stay deterministic under test.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::case::{Case, CaseType};

/// Days ahead of today (inclusive) a hearing counts as urgent.
pub const URGENT_WINDOW_DAYS: i64 = 7;

/// Filter selection for the case list.
///
/// A field that is `None` or blank matches everything; the three
/// predicates are AND-combined.
#[derive(Debug, Clone, Default)]
pub struct CaseFilter {
    /// Case-insensitive substring match on case number or client name.
    pub search: Option<String>,
    /// Exact court name.
    pub court: Option<String>,
    /// Exact case category.
    pub case_type: Option<CaseType>,
}

fn active(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Cases passing all filter predicates, in insertion order.
pub fn filtered_cases<'a>(all: &'a [Case], filter: &CaseFilter) -> Vec<&'a Case> {
    let search = active(&filter.search).map(str::to_lowercase);
    let court = active(&filter.court);

    all.iter()
        .filter(|case| {
            search.as_deref().is_none_or(|term| {
                case.case_number.to_lowercase().contains(term)
                    || case.client_name.to_lowercase().contains(term)
            })
        })
        .filter(|case| court.is_none_or(|name| case.court_name == name))
        .filter(|case| filter.case_type.is_none_or(|kind| case.case_type == kind))
        .collect()
}

/// Cases heard today or later, ascending by hearing date.
///
/// The sort is stable: same-day hearings keep their insertion order.
pub fn upcoming_hearings<'a>(all: &'a [Case], today: NaiveDate) -> Vec<&'a Case> {
    let mut upcoming: Vec<&Case> = all
        .iter()
        .filter(|case| case.hearing_date >= today)
        .collect();
    upcoming.sort_by_key(|case| case.hearing_date);
    upcoming
}

/// True when `hearing_date` falls within the urgent window: today through
/// [`URGENT_WINDOW_DAYS`] days out, inclusive on both ends.
pub fn is_urgent(hearing_date: NaiveDate, today: NaiveDate) -> bool {
    let days = hearing_date.signed_duration_since(today).num_days();
    (0..=URGENT_WINDOW_DAYS).contains(&days)
}

/// Unique court names present in the collection, sorted lexicographically.
pub fn distinct_courts(all: &[Case]) -> Vec<String> {
    let courts: BTreeSet<&str> = all.iter().map(|case| case.court_name.as_str()).collect();
    courts.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Days, NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::{CaseFilter, distinct_courts, filtered_cases, is_urgent, upcoming_hearings};
    use crate::case::{Case, CaseStatus, CaseType};

    fn case_fixture(id: i64, number: &str, client: &str, court: &str, hearing: NaiveDate) -> Case {
        Case {
            id,
            case_number: number.to_string(),
            court_name: court.to_string(),
            case_type: CaseType::Civil,
            client_name: client.to_string(),
            opponent_name: String::new(),
            hearing_date: hearing,
            case_status: CaseStatus::Pending,
            notes: String::new(),
            created_at: Utc
                .with_ymd_and_hms(2026, 8, 1, 9, 0, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    fn date(value: &str) -> NaiveDate {
        value.parse().expect("valid date")
    }

    #[test]
    fn search_matches_case_number_and_client_case_insensitively() {
        let all = vec![
            case_fixture(1, "CV-AB-2024", "Careem Noor", "High Court", date("2026-09-01")),
            case_fixture(2, "CR-77-2024", "Abdul Rahman", "High Court", date("2026-09-02")),
            case_fixture(3, "FM-15-2024", "Careem Noor", "High Court", date("2026-09-03")),
        ];
        let filter = CaseFilter {
            search: Some("ab".to_string()),
            ..CaseFilter::default()
        };

        let ids: Vec<i64> = filtered_cases(&all, &filter).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2], "matches number of 1 and client of 2, not 3");
    }

    #[test]
    fn blank_filters_match_everything() {
        let all = vec![
            case_fixture(1, "CV-1", "Abdul Rahman", "High Court", date("2026-09-01")),
            case_fixture(2, "CV-2", "Careem Noor", "District Court", date("2026-09-02")),
        ];
        let filter = CaseFilter {
            search: Some("   ".to_string()),
            court: Some(String::new()),
            case_type: None,
        };

        assert_eq!(filtered_cases(&all, &filter).len(), 2);
    }

    #[test]
    fn court_and_type_filters_are_exact_and_and_combined() {
        let mut family = case_fixture(3, "FM-3", "Sana Malik", "Family Court", date("2026-09-03"));
        family.case_type = CaseType::Family;
        let all = vec![
            case_fixture(1, "CV-1", "Abdul Rahman", "High Court", date("2026-09-01")),
            case_fixture(2, "CV-2", "Careem Noor", "District Court", date("2026-09-02")),
            family,
        ];

        let filter = CaseFilter {
            court: Some("Family Court".to_string()),
            case_type: Some(CaseType::Family),
            ..CaseFilter::default()
        };
        let ids: Vec<i64> = filtered_cases(&all, &filter).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3]);

        let mismatch = CaseFilter {
            court: Some("Family Court".to_string()),
            case_type: Some(CaseType::Civil),
            ..CaseFilter::default()
        };
        assert!(filtered_cases(&all, &mismatch).is_empty());
    }

    #[test]
    fn upcoming_excludes_past_hearings_and_sorts_ascending() {
        let today = date("2026-08-07");
        let all = vec![
            case_fixture(1, "CV-1", "A", "High Court", today + Days::new(3)),
            case_fixture(2, "CV-2", "B", "High Court", today),
            case_fixture(3, "CV-3", "C", "High Court", today - Days::new(1)),
            case_fixture(4, "CV-4", "D", "High Court", today + Days::new(1)),
        ];

        let ids: Vec<i64> = upcoming_hearings(&all, today).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 4, 1], "today first, yesterday excluded");
    }

    #[test]
    fn upcoming_sort_is_stable_for_same_day_hearings() {
        let today = date("2026-08-07");
        let all = vec![
            case_fixture(1, "CV-1", "A", "High Court", today + Days::new(2)),
            case_fixture(2, "CV-2", "B", "High Court", today + Days::new(2)),
            case_fixture(3, "CV-3", "C", "High Court", today + Days::new(2)),
        ];

        let ids: Vec<i64> = upcoming_hearings(&all, today).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3], "insertion order preserved on ties");
    }

    #[test]
    fn urgency_window_is_inclusive_on_both_ends() {
        let today = date("2026-08-07");
        assert!(is_urgent(today, today));
        assert!(is_urgent(today + Days::new(7), today));
        assert!(!is_urgent(today + Days::new(8), today));
        assert!(!is_urgent(today - Days::new(1), today));
    }

    #[test]
    fn distinct_courts_dedupes_and_sorts() {
        let all = vec![
            case_fixture(1, "CV-1", "A", "High Court", date("2026-09-01")),
            case_fixture(2, "CV-2", "B", "District Court", date("2026-09-02")),
            case_fixture(3, "CV-3", "C", "High Court", date("2026-09-03")),
            case_fixture(4, "CV-4", "D", "Family Court", date("2026-09-04")),
        ];

        assert_eq!(
            distinct_courts(&all),
            vec!["District Court", "Family Court", "High Court"]
        );
    }

    #[test]
    fn distinct_courts_of_empty_collection_is_empty() {
        assert!(distinct_courts(&[]).is_empty());
    }
}
