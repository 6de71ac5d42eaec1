//! Markdown table rendering for the terminal.
//!
//! Tables are built as plain markdown and handed to termimad for display,
//! the same table shapes a paper docket or deadlines calendar would use.

use chrono::NaiveDate;

use crate::case::Case;
use crate::views::is_urgent;

fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Case list table, one row per case in the given order.
pub fn case_table(cases: &[&Case]) -> String {
    let mut md = String::from(
        "| ID | Case No. | Court | Type | Client | Opponent | Hearing | Status |\n\
         |---|---|---|---|---|---|---|---|\n",
    );
    for case in cases {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
            case.id,
            cell(&case.case_number),
            cell(&case.court_name),
            case.case_type,
            cell(&case.client_name),
            cell(&case.opponent_name),
            case.hearing_date,
            case.case_status,
        ));
    }
    md
}

fn when_label(hearing: NaiveDate, today: NaiveDate) -> String {
    match hearing.signed_duration_since(today).num_days() {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        n => format!("in {n} days"),
    }
}

/// Upcoming hearings table; urgent rows carry a bold date and a marker.
pub fn upcoming_table(cases: &[&Case], today: NaiveDate) -> String {
    let mut md = String::from(
        "| Hearing | When | Case No. | Court | Client | Status |\n\
         |---|---|---|---|---|---|\n",
    );
    for case in cases {
        let urgent = is_urgent(case.hearing_date, today);
        let hearing = if urgent {
            format!("**{}**", case.hearing_date)
        } else {
            case.hearing_date.to_string()
        };
        let when = if urgent {
            format!("{} ⚠", when_label(case.hearing_date, today))
        } else {
            when_label(case.hearing_date, today)
        };
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            hearing,
            when,
            cell(&case.case_number),
            cell(&case.court_name),
            cell(&case.client_name),
            case.case_status,
        ));
    }
    md
}

/// Bullet list of court names.
pub fn court_list(courts: &[String]) -> String {
    let mut md = String::new();
    for court in courts {
        md.push_str(&format!("* {}\n", cell(court)));
    }
    md
}
