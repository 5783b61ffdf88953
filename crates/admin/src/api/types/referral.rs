//! Referral programme applications.

use chrono::{DateTime, Utc};
use exhiibot_core::{ApplicationId, ApplicationStatus, Pagination};
use serde::{Deserialize, Serialize};

/// A user's application to become an official referrer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralApplication {
    #[serde(rename = "_id")]
    pub id: ApplicationId,
    /// Applicant, as an ID or a populated profile.
    pub user: Option<serde_json::Value>,
    #[serde(default)]
    pub full_name: String,
    pub email: Option<String>,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub social_media_handle: String,
    pub follower_count: Option<u64>,
    pub reason: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,
    pub admin_notes: Option<String>,
    pub referral_code_data: Option<ReferralCodeData>,
    // Flat fallbacks used by older records.
    pub approved_code: Option<String>,
    pub referral_code: Option<String>,
    pub code: Option<String>,
    pub discount_percentage: Option<f64>,
    pub discount: Option<f64>,
    pub percentage: Option<f64>,
    #[serde(rename = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ReferralApplication {
    /// The awarded referral code, wherever the record keeps it.
    ///
    /// Candidates are tried in order and empty ones are skipped.
    #[must_use]
    pub fn awarded_code(&self) -> Option<&str> {
        let nested = self.referral_code_data.as_ref().map(|data| data.code.as_str());
        [
            nested,
            self.approved_code.as_deref(),
            self.referral_code.as_deref(),
            self.code.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find(|code| !code.trim().is_empty())
    }

    /// The awarded discount percentage, wherever the record keeps it.
    ///
    /// Candidates are tried in order and zero ones are skipped.
    #[must_use]
    pub fn awarded_discount(&self) -> Option<f64> {
        let nested = self
            .referral_code_data
            .as_ref()
            .and_then(|data| data.discount_percentage);
        [
            nested,
            self.discount_percentage,
            self.discount,
            self.percentage,
        ]
        .into_iter()
        .flatten()
        .find(|discount| *discount > 0.0)
    }
}

/// Code issued when an application is approved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralCodeData {
    #[serde(default)]
    pub code: String,
    pub discount_percentage: Option<f64>,
    #[serde(default)]
    pub is_active: bool,
}

/// `data` payload of `GET /referral-applications/admin`.
///
/// The endpoint has returned both a bare array and a wrapped object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApplicationsData {
    List(Vec<ReferralApplication>),
    Wrapped {
        #[serde(default)]
        applications: Vec<ReferralApplication>,
        pagination: Option<Pagination>,
    },
}

impl ApplicationsData {
    /// Applications plus pagination, synthesising one page when absent.
    #[must_use]
    pub fn into_parts(self) -> (Vec<ReferralApplication>, Pagination) {
        match self {
            Self::List(items) => {
                let pagination = Pagination::single_page(items.len());
                (items, pagination)
            }
            Self::Wrapped {
                applications,
                pagination,
            } => {
                let pagination =
                    pagination.unwrap_or_else(|| Pagination::single_page(applications.len()));
                (applications, pagination)
            }
        }
    }
}

/// `data` payload of the review endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationData {
    pub application: ReferralApplication,
}

/// Filter for the application list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    pub status: Option<ApplicationStatus>,
}

/// Outcome chosen by a reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl ReviewDecision {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for ReviewDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" | "approve" => Ok(Self::Approved),
            "rejected" | "reject" => Ok(Self::Rejected),
            _ => Err(format!("invalid review decision: {s}")),
        }
    }
}

/// Body of `PUT /referral-applications/admin/{id}/review`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewApplication {
    pub status: ReviewDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const APPROVED_NESTED: &str = r#"{
        "_id": "a1",
        "fullName": "Ada Obi",
        "platform": "instagram",
        "socialMediaHandle": "@ada",
        "status": "approved",
        "referralCodeData": {"code": "ADA10", "discountPercentage": 10, "isActive": true},
        "created_at": "2024-02-02T10:00:00Z"
    }"#;

    #[test]
    fn test_awarded_code_prefers_nested_data() {
        let app: ReferralApplication = serde_json::from_str(APPROVED_NESTED).unwrap();
        assert_eq!(app.status, ApplicationStatus::Approved);
        assert_eq!(app.awarded_code(), Some("ADA10"));
        assert_eq!(app.awarded_discount(), Some(10.0));
    }

    #[test]
    fn test_awarded_code_falls_back_to_flat_fields() {
        let app: ReferralApplication = serde_json::from_str(
            r#"{"_id":"a2","status":"approved","referralCode":"TAP5","discount":5}"#,
        )
        .unwrap();
        assert_eq!(app.awarded_code(), Some("TAP5"));
        assert_eq!(app.awarded_discount(), Some(5.0));

        let pending: ReferralApplication =
            serde_json::from_str(r#"{"_id":"a3","fullName":"New"}"#).unwrap();
        assert_eq!(pending.status, ApplicationStatus::Pending);
        assert_eq!(pending.awarded_code(), None);
    }

    #[test]
    fn test_empty_nested_code_falls_through() {
        let app: ReferralApplication = serde_json::from_str(
            r#"{
                "_id": "a4",
                "status": "approved",
                "referralCodeData": {"code": "", "discountPercentage": 0, "isActive": false},
                "approvedCode": "ADA10",
                "discountPercentage": 10
            }"#,
        )
        .unwrap();
        assert_eq!(app.awarded_code(), Some("ADA10"));
        assert_eq!(app.awarded_discount(), Some(10.0));

        let legacy: ReferralApplication = serde_json::from_str(
            r#"{"_id":"a5","code":"","referralCode":"OLD7","discount":0,"percentage":7}"#,
        )
        .unwrap();
        assert_eq!(legacy.awarded_code(), Some("OLD7"));
        assert_eq!(legacy.awarded_discount(), Some(7.0));
    }

    #[test]
    fn test_applications_payload_shapes() {
        let bare: ApplicationsData =
            serde_json::from_str(&format!("[{APPROVED_NESTED}]")).unwrap();
        let (items, pagination) = bare.into_parts();
        assert_eq!(items.len(), 1);
        assert_eq!(pagination.total, 1);

        let wrapped: ApplicationsData = serde_json::from_str(&format!(
            r#"{{"applications":[{APPROVED_NESTED}],"pagination":{{"total":9,"page":2,"limit":1,"pages":9}}}}"#
        ))
        .unwrap();
        let (items, pagination) = wrapped.into_parts();
        assert_eq!(items.len(), 1);
        assert_eq!(pagination.page, 2);
    }

    #[test]
    fn test_review_body() {
        let body = ReviewApplication {
            status: ReviewDecision::Approved,
            admin_notes: None,
            discount_percentage: Some(15.0),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"status": "approved", "discountPercentage": 15.0})
        );
    }
}
