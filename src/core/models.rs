// src/core/models.rs
//! Stored documents and their inputs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::interview::types::JobDetails;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Student,
    Company,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Application,
    Approval,
    Rejection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub user_type: UserType,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub is_admin: bool,
    pub status: Option<ApprovalStatus>,
    pub profile_completed: bool,
    #[sqlx(json)]
    pub experience: Vec<ExperienceEntry>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_company(&self) -> bool {
        self.user_type == UserType::Company
    }

    pub fn is_approved_company(&self) -> bool {
        self.is_company() && self.status == Some(ApprovalStatus::Approved)
    }

    /// Name shown next to reviews, `Anonim` when none is set
    pub fn display_name(&self) -> String {
        let name = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        );
        let name = name.trim();
        if name.is_empty() {
            "Anonim".to_string()
        } else {
            name.to_string()
        }
    }
}

/// Profile fields a user may set on their own document
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub user_type: UserType,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
}

/// Company a student may review, from a finished experience entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibleCompany {
    pub id: String,
    pub company_name: String,
    pub job_title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub company_id: String,
    pub company_name: String,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub location: String,
    pub job_type: String,
    pub salary: Option<String>,
    pub benefits: Option<String>,
    pub application_deadline: Option<DateTime<Utc>>,
    pub is_remote: bool,
    pub status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Announcement> for JobDetails {
    fn from(announcement: Announcement) -> Self {
        JobDetails {
            id: announcement.id,
            title: announcement.title,
            company_name: announcement.company_name,
            description: announcement.description,
            requirements: announcement.requirements,
            location: announcement.location,
            job_type: announcement.job_type,
            salary: announcement.salary,
            is_remote: announcement.is_remote,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub job_type: String,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
    #[serde(default)]
    pub application_deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_remote: bool,
}

impl AnnouncementInput {
    /// Names of required fields left blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("description", &self.description),
            ("requirements", &self.requirements),
            ("location", &self.location),
            ("jobType", &self.job_type),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub announcement_id: String,
    pub student_id: String,
    pub company_id: String,
    pub message: Option<String>,
    pub status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub message: String,
    pub read: bool,
    #[sqlx(flatten)]
    pub data: NotificationData,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// A fresh unread notification
    pub fn new(user_id: &str, kind: NotificationType, message: &str, data: NotificationData) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            kind,
            message: message.to_string(),
            read: false,
            data,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CompanyReview {
    pub id: String,
    pub company_id: String,
    pub student_id: String,
    pub student_name: String,
    pub rating: i64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}
