//! The case record and its creation inputs.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Category of court matter a case belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseType {
    #[default]
    Civil,
    Criminal,
    Family,
    Property,
}

impl CaseType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Civil => "Civil",
            Self::Criminal => "Criminal",
            Self::Family => "Family",
            Self::Property => "Property",
        }
    }
}

impl FromStr for CaseType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "civil" => Ok(Self::Civil),
            "criminal" => Ok(Self::Criminal),
            "family" => Ok(Self::Family),
            "property" => Ok(Self::Property),
            other => Err(format!(
                "unknown case type '{other}' (expected civil, criminal, family, or property)"
            )),
        }
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a case stands on the docket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseStatus {
    #[default]
    Pending,
    Adjourned,
    Closed,
}

impl CaseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Adjourned => "Adjourned",
            Self::Closed => "Closed",
        }
    }
}

impl FromStr for CaseStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "adjourned" => Ok(Self::Adjourned),
            "closed" => Ok(Self::Closed),
            other => Err(format!(
                "unknown case status '{other}' (expected pending, adjourned, or closed)"
            )),
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tracked court matter.
///
/// Serialized field names match the stored document format, so a docket
/// written by one build reloads unchanged in the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    /// Unique, immutable, assigned once at creation.
    pub id: i64,
    pub case_number: String,
    pub court_name: String,
    pub case_type: CaseType,
    pub client_name: String,
    #[serde(default)]
    pub opponent_name: String,
    /// Next scheduled court appearance; a calendar date, no time of day.
    pub hearing_date: NaiveDate,
    pub case_status: CaseStatus,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new case, prior to validation.
#[derive(Debug, Clone, Default)]
pub struct CaseDraft {
    pub case_number: String,
    pub court_name: String,
    pub case_type: CaseType,
    pub client_name: String,
    pub opponent_name: String,
    pub hearing_date: Option<NaiveDate>,
    pub notes: String,
}

impl CaseDraft {
    /// Check the required fields, reporting every missing one at once.
    pub fn validate_required_fields(&self) -> Result<NaiveDate, ValidationError> {
        let mut missing = Vec::new();
        if self.case_number.trim().is_empty() {
            missing.push("case number");
        }
        if self.court_name.trim().is_empty() {
            missing.push("court name");
        }
        if self.client_name.trim().is_empty() {
            missing.push("client name");
        }
        if self.hearing_date.is_none() {
            missing.push("hearing date");
        }

        match self.hearing_date {
            Some(date) if missing.is_empty() => Ok(date),
            _ => Err(ValidationError { missing }),
        }
    }
}

/// Derive a unique case ID from the current time.
///
/// IDs are epoch milliseconds. A collision with an existing ID (several
/// cases created within one millisecond, or a clock stepping backwards)
/// bumps the candidate until it is unique in the collection.
pub fn next_case_id(existing: &[Case], now: DateTime<Utc>) -> i64 {
    let mut candidate = now.timestamp_millis();
    while existing.iter().any(|case| case.id == candidate) {
        candidate += 1;
    }
    candidate
}
