//! Mutation operations: the only paths that change the docket.

use chrono::{Months, NaiveDate, Utc};

use crate::case::{Case, CaseDraft, CaseStatus, next_case_id};
use crate::error::ValidationError;
use crate::store::CaseStore;

/// Validate a draft and append the resulting case to the store.
///
/// Validation reports every missing required field in one aggregate error
/// and performs no mutation on failure. On success the case gets a unique
/// timestamp-derived ID, a creation timestamp, and the default Pending
/// status.
pub fn create_case(store: &mut CaseStore, draft: CaseDraft) -> Result<Case, ValidationError> {
    let hearing_date = draft.validate_required_fields()?;
    let now = Utc::now();

    let case = Case {
        id: next_case_id(store.cases(), now),
        case_number: draft.case_number.trim().to_string(),
        court_name: draft.court_name.trim().to_string(),
        case_type: draft.case_type,
        client_name: draft.client_name.trim().to_string(),
        opponent_name: draft.opponent_name.trim().to_string(),
        hearing_date,
        case_status: CaseStatus::default(),
        notes: draft.notes.trim().to_string(),
        created_at: now,
    };

    store.add(case.clone());
    Ok(case)
}

/// Push the case's hearing exactly one calendar month out and mark it
/// adjourned.
///
/// The day of month is preserved when the target month has it and clamped
/// to that month's last day otherwise: Jan 31 advances to Feb 28, or
/// Feb 29 in a leap year. The status becomes Adjourned unconditionally,
/// even for a Closed case. Unknown IDs are a silent no-op.
pub fn advance_hearing(store: &mut CaseStore, id: i64) -> Option<Case> {
    store.replace(id, |case| {
        let mut adjourned = case.clone();
        adjourned.hearing_date = add_one_month(case.hearing_date);
        adjourned.case_status = CaseStatus::Adjourned;
        adjourned
    })
}

// checked_add_months only fails past NaiveDate::MAX; hearing dates never
// get there.
fn add_one_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap_or(date)
}

/// Remove the case with `id`; `false` when no such case exists.
///
/// Any confirmation prompt belongs to the presentation layer.
pub fn delete_case(store: &mut CaseStore, id: i64) -> bool {
    store.remove(id)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::{add_one_month, advance_hearing, create_case, delete_case};
    use crate::case::{CaseDraft, CaseStatus, CaseType};
    use crate::storage::MemoryBackend;
    use crate::store::CaseStore;

    fn empty_store() -> CaseStore {
        let mut store = CaseStore::new(Arc::new(MemoryBackend::default()));
        store.initialize();
        store
    }

    fn draft(number: &str, client: &str, hearing: &str) -> CaseDraft {
        CaseDraft {
            case_number: number.to_string(),
            court_name: "District Court".to_string(),
            case_type: CaseType::Civil,
            client_name: client.to_string(),
            opponent_name: String::new(),
            hearing_date: Some(hearing.parse().expect("valid date")),
            notes: String::new(),
        }
    }

    fn date(value: &str) -> NaiveDate {
        value.parse().expect("valid date")
    }

    #[test]
    fn create_assigns_unique_ids_and_defaults() {
        let mut store = empty_store();
        let first = create_case(&mut store, draft("CV-1", "Abdul Rahman", "2026-09-01"))
            .expect("valid draft");
        let second = create_case(&mut store, draft("CV-2", "Careem Noor", "2026-09-02"))
            .expect("valid draft");

        assert_ne!(first.id, second.id);
        assert_eq!(first.case_status, CaseStatus::Pending);
        assert_eq!(first.opponent_name, "");
        assert_eq!(store.cases().len(), 2);
    }

    #[test]
    fn create_with_missing_fields_leaves_the_collection_unchanged() {
        let mut store = empty_store();
        let mut invalid = draft("", "Abdul Rahman", "2026-09-01");
        invalid.court_name = String::new();

        let err = create_case(&mut store, invalid).expect_err("invalid draft");
        assert_eq!(err.missing, vec!["case number", "court name"]);
        assert!(store.cases().is_empty());
    }

    #[test]
    fn create_trims_whitespace_from_text_fields() {
        let mut store = empty_store();
        let case = create_case(&mut store, draft("  CV-9  ", "  Sana Malik ", "2026-09-01"))
            .expect("valid draft");
        assert_eq!(case.case_number, "CV-9");
        assert_eq!(case.client_name, "Sana Malik");
    }

    #[test]
    fn add_one_month_clamps_to_the_target_months_last_day() {
        assert_eq!(add_one_month(date("2024-01-31")), date("2024-02-29"));
        assert_eq!(add_one_month(date("2023-01-31")), date("2023-02-28"));
        assert_eq!(add_one_month(date("2026-03-31")), date("2026-04-30"));
        assert_eq!(add_one_month(date("2026-08-15")), date("2026-09-15"));
        assert_eq!(add_one_month(date("2026-12-15")), date("2027-01-15"));
    }

    #[test]
    fn advance_moves_the_hearing_and_forces_adjourned() {
        let mut store = empty_store();
        let case = create_case(&mut store, draft("CV-1", "Abdul Rahman", "2024-01-31"))
            .expect("valid draft");
        store.replace(case.id, |existing| {
            let mut closed = existing.clone();
            closed.case_status = CaseStatus::Closed;
            closed
        });

        let advanced = advance_hearing(&mut store, case.id).expect("case exists");
        assert_eq!(advanced.hearing_date, date("2024-02-29"));
        assert_eq!(
            advanced.case_status,
            CaseStatus::Adjourned,
            "even a closed case comes back adjourned"
        );
    }

    #[test]
    fn advance_on_unknown_id_leaves_the_collection_unchanged() {
        let mut store = empty_store();
        create_case(&mut store, draft("CV-1", "Abdul Rahman", "2026-09-01"))
            .expect("valid draft");
        let before = store.cases().to_vec();

        assert!(advance_hearing(&mut store, 404).is_none());
        assert_eq!(store.cases(), before.as_slice());
    }

    #[test]
    fn delete_removes_only_the_matching_case() {
        let mut store = empty_store();
        let first = create_case(&mut store, draft("CV-1", "Abdul Rahman", "2026-09-01"))
            .expect("valid draft");
        let second = create_case(&mut store, draft("CV-2", "Careem Noor", "2026-09-02"))
            .expect("valid draft");

        assert!(delete_case(&mut store, first.id));
        assert_eq!(store.cases().to_vec(), vec![second]);
        assert!(!delete_case(&mut store, first.id), "already gone");
    }
}
