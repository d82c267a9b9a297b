//! Project analyses and analyst decisions.
//!
//! `ChecklistStatus` and `Fulfillability` are closed enumerations with a
//! single canonical wire vocabulary. Historical data carries two spellings
//! for the same concept ("Unachievable" in UI exports, "Not Fulfilled" in
//! stored rows); `ChecklistStatus::parse` accepts both so either loads as
//! `NotFulfilled`. The engine only ever compares variants.

use serde::{Deserialize, Serialize};

/// One versioned review cycle for one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectAnalysis {
    pub id: i64,
    pub project_id: i64,
    /// Monotonic per project; a new review cycle is version N+1, never a
    /// mutation of version N.
    pub version: i64,
    pub started_at: i64,
    pub modified_at: i64,
    /// Selected "new use" tags. Raw elements as stored — legacy rows may
    /// hold delimited strings or brace literals; normalize before use.
    pub new_use: Vec<String>,
    /// Selected fulfillability tags. Same caveat as `new_use`.
    pub fulfillability: Vec<String>,
}

/// The analyst's classification of one parameter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistStatus {
    Fulfilled,
    NotFulfilled,
    NotRelevant,
    NotVerifiable,
}

impl ChecklistStatus {
    /// Canonical wire string, used in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fulfilled => "fulfilled",
            Self::NotFulfilled => "not_fulfilled",
            Self::NotRelevant => "not_relevant",
            Self::NotVerifiable => "not_verifiable",
        }
    }

    /// Parse a stored or boundary value. Accepts the canonical wire
    /// strings plus legacy UI labels, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "fulfilled" => Some(Self::Fulfilled),
            "not_fulfilled" | "not fulfilled" | "unachievable" => Some(Self::NotFulfilled),
            "not_relevant" | "not relevant" => Some(Self::NotRelevant),
            "not_verifiable" | "not verifiable" => Some(Self::NotVerifiable),
            _ => None,
        }
    }

    /// True for statuses that carry a revised fulfillability. All other
    /// statuses force the revision to null on transition.
    pub fn keeps_revision(self) -> bool {
        matches!(self, Self::NotFulfilled | Self::NotVerifiable)
    }
}

/// Severity/effort tag assigned when a requirement is not fulfilled or
/// not verifiable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fulfillability {
    Light,
    Medium,
    Heavy,
}

impl Fulfillability {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Heavy => "heavy",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "light" => Some(Self::Light),
            "medium" => Some(Self::Medium),
            "heavy" => Some(Self::Heavy),
            _ => None,
        }
    }
}

/// One analyst decision for one (analysis, entry) pair.
///
/// At most one record exists per pair; the store's upsert enforces this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: i64,
    pub analysis_id: i64,
    pub entry_id: i64,
    pub status: Option<ChecklistStatus>,
    pub revised_fulfillability: Option<Fulfillability>,
    pub updated_at: i64,
}
