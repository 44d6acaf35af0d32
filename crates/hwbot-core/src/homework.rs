//! Homework review records and the notification text derived from them.

use serde::{Deserialize, Deserializer, Serialize};

/// Sent instead of a status message when a record lacks a name or status.
pub const API_MALFUNCTION_MESSAGE: &str = "The Practicum API is not working correctly!";

pub const VERDICT_REJECTED: &str = "Unfortunately, the reviewer found errors in your work.";
pub const VERDICT_APPROVED: &str = "The reviewer liked everything, your work is accepted!";
pub const VERDICT_PENDING: &str = "Your work has not been reviewed yet.";

/// Review status reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Rejected,
    Approved,
    /// Any other status string (`reviewing`, or something new).
    #[serde(other)]
    Pending,
}

impl ReviewStatus {
    /// Human-readable judgment appended to a notification.
    pub fn verdict(&self) -> &'static str {
        match self {
            Self::Rejected => VERDICT_REJECTED,
            Self::Approved => VERDICT_APPROVED,
            Self::Pending => VERDICT_PENDING,
        }
    }
}

/// One assignment-review record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeworkCheck {
    #[serde(default)]
    pub homework_name: Option<String>,
    #[serde(default)]
    pub status: Option<ReviewStatus>,
}

/// Body of a successful `homework_statuses` fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeworkStatuses {
    /// Missing and `null` both mean "no records".
    #[serde(default, deserialize_with = "null_as_empty")]
    pub homeworks: Vec<HomeworkCheck>,
    /// Server-side watermark for the next request.
    #[serde(default)]
    pub current_date: Option<i64>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl HomeworkStatuses {
    /// The record to report on, if any.
    ///
    /// Takes the first element: the API is assumed to list the most recent
    /// check first. That ordering is not documented and is not verified here.
    pub fn latest(&self) -> Option<&HomeworkCheck> {
        self.homeworks.first()
    }
}

/// Build the notification text for a homework check.
///
/// Never fails: incomplete records produce [`API_MALFUNCTION_MESSAGE`].
pub fn format_status(check: &HomeworkCheck) -> String {
    let (Some(name), Some(status)) = (check.homework_name.as_deref(), check.status) else {
        return API_MALFUNCTION_MESSAGE.to_string();
    };
    format!(
        "Your work \"{name}\" has been checked!\n\n{}",
        status.verdict()
    )
}
