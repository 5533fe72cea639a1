// src/core/repos/announcements.rs
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::core::models::{Announcement, AnnouncementInput, ApprovalStatus, User};

const ANNOUNCEMENT_COLUMNS: &str = "id, company_id, company_name, title, description, \
     requirements, location, job_type, salary, benefits, application_deadline, is_remote, \
     status, created_at";

pub struct AnnouncementRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AnnouncementRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, id: &str) -> Result<Option<Announcement>> {
        let announcement = sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {} FROM announcements WHERE id = ?",
            ANNOUNCEMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(announcement)
    }

    /// Publish an announcement for an approved company
    pub async fn create(&self, company: &User, input: &AnnouncementInput) -> Result<Announcement> {
        let announcement = Announcement {
            id: Uuid::new_v4().to_string(),
            company_id: company.id.clone(),
            company_name: company.company_name.clone().unwrap_or_default(),
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            requirements: input.requirements.trim().to_string(),
            location: input.location.trim().to_string(),
            job_type: input.job_type.trim().to_string(),
            salary: input.salary.clone(),
            benefits: input.benefits.clone(),
            application_deadline: input.application_deadline,
            is_remote: input.is_remote,
            status: ApprovalStatus::Approved,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO announcements (id, company_id, company_name, title, description,
                requirements, location, job_type, salary, benefits, application_deadline,
                is_remote, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&announcement.id)
        .bind(&announcement.company_id)
        .bind(&announcement.company_name)
        .bind(&announcement.title)
        .bind(&announcement.description)
        .bind(&announcement.requirements)
        .bind(&announcement.location)
        .bind(&announcement.job_type)
        .bind(&announcement.salary)
        .bind(&announcement.benefits)
        .bind(announcement.application_deadline)
        .bind(announcement.is_remote)
        .bind(announcement.status)
        .bind(announcement.created_at)
        .execute(self.pool)
        .await?;

        info!(
            "Company {} published announcement {} ({})",
            announcement.company_id, announcement.id, announcement.title
        );
        Ok(announcement)
    }

    pub async fn update(&self, id: &str, input: &AnnouncementInput) -> Result<Option<Announcement>> {
        let result = sqlx::query(
            r#"
            UPDATE announcements SET title = ?, description = ?, requirements = ?, location = ?,
                job_type = ?, salary = ?, benefits = ?, application_deadline = ?, is_remote = ?
            WHERE id = ?
            "#,
        )
        .bind(input.title.trim())
        .bind(input.description.trim())
        .bind(input.requirements.trim())
        .bind(input.location.trim())
        .bind(input.job_type.trim())
        .bind(&input.salary)
        .bind(&input.benefits)
        .bind(input.application_deadline)
        .bind(input.is_remote)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find(id).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Approved announcements, newest first
    pub async fn list_approved(&self) -> Result<Vec<Announcement>> {
        let announcements = sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {} FROM announcements WHERE status = 'approved' \
             ORDER BY created_at DESC, rowid DESC",
            ANNOUNCEMENT_COLUMNS
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(announcements)
    }

    /// Every announcement of one company, newest first
    pub async fn list_for_company(&self, company_id: &str) -> Result<Vec<Announcement>> {
        let announcements = sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {} FROM announcements WHERE company_id = ? \
             ORDER BY created_at DESC, rowid DESC",
            ANNOUNCEMENT_COLUMNS
        ))
        .bind(company_id)
        .fetch_all(self.pool)
        .await?;

        Ok(announcements)
    }
}
