use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Literal placeholder for absent optional fields. A cell in the store is
/// never empty: it holds either a real value or this sentinel, which keeps
/// the tabular schema rectangular and round-trips unambiguous.
pub const NOT_FOUND: &str = "Not found";

// --- Outreach status ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutreachStatus {
    #[default]
    #[serde(rename = "Not contacted")]
    NotContacted,
    #[serde(rename = "Request sent")]
    RequestSent,
    #[serde(rename = "Accepted")]
    Accepted,
    #[serde(rename = "Meeting scheduled")]
    MeetingScheduled,
    #[serde(rename = "Passed")]
    Passed,
}

impl OutreachStatus {
    /// Allowed values, in the order shown in the sheet dropdown.
    pub const ALL: [OutreachStatus; 5] = [
        OutreachStatus::NotContacted,
        OutreachStatus::RequestSent,
        OutreachStatus::Accepted,
        OutreachStatus::MeetingScheduled,
        OutreachStatus::Passed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutreachStatus::NotContacted => "Not contacted",
            OutreachStatus::RequestSent => "Request sent",
            OutreachStatus::Accepted => "Accepted",
            OutreachStatus::MeetingScheduled => "Meeting scheduled",
            OutreachStatus::Passed => "Passed",
        }
    }
}

impl std::fmt::Display for OutreachStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Investor record ---

/// One prospective investor. The declaration order of the fields is the
/// store's column order and the sheet's column order.
///
/// Lifecycle: created by the extractor with the eight source fields populated
/// (or defaulted to the sentinel), then mutated exactly once by the enricher,
/// which fills `personalized_message`, `outreach_status`, and `date_added`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestorRecord {
    pub full_name: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub linkedin_url: String,
    pub email: String,
    pub investment_focus: String,
    pub portfolio_companies: String,
    pub personalized_message: String,
    pub outreach_status: OutreachStatus,
    pub date_added: Option<NaiveDate>,
    pub source_url: String,
}

impl InvestorRecord {
    pub fn has_linkedin(&self) -> bool {
        self.linkedin_url != NOT_FOUND
    }

    pub fn has_email(&self) -> bool {
        self.email != NOT_FOUND
    }
}

// --- Search result ---

/// One raw search response, paired with the query that produced it.
/// Transient: consumed by the extractor, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub query: String,
    pub results: String,
}
