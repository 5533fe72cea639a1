// src/core/repos/applications.rs
use anyhow::Result;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::info;
use uuid::Uuid;

use crate::core::models::{Announcement, Application, ApprovalStatus};

const APPLICATION_COLUMNS: &str =
    "id, announcement_id, student_id, company_id, message, status, created_at";

#[derive(Debug, Clone, Copy, Default)]
pub struct ApplicationFilter<'a> {
    pub student_id: Option<&'a str>,
    pub announcement_id: Option<&'a str>,
    pub company_id: Option<&'a str>,
}

pub struct ApplicationRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ApplicationRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, id: &str) -> Result<Option<Application>> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "SELECT {} FROM applications WHERE id = ?",
            APPLICATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(application)
    }

    pub async fn exists(&self, announcement_id: &str, student_id: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM applications WHERE announcement_id = ? AND student_id = ?",
        )
        .bind(announcement_id)
        .bind(student_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count > 0)
    }

    pub async fn create(
        &self,
        announcement: &Announcement,
        student_id: &str,
        message: Option<String>,
    ) -> Result<Application> {
        let application = Application {
            id: Uuid::new_v4().to_string(),
            announcement_id: announcement.id.clone(),
            student_id: student_id.to_string(),
            company_id: announcement.company_id.clone(),
            message,
            status: ApprovalStatus::Pending,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO applications (id, announcement_id, student_id, company_id, message,
                                      status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&application.id)
        .bind(&application.announcement_id)
        .bind(&application.student_id)
        .bind(&application.company_id)
        .bind(&application.message)
        .bind(application.status)
        .bind(application.created_at)
        .execute(self.pool)
        .await?;

        info!(
            "Student {} applied to announcement {}",
            student_id, announcement.id
        );
        Ok(application)
    }

    /// Applications matching every set filter, newest first
    pub async fn list(&self, filter: &ApplicationFilter<'_>) -> Result<Vec<Application>> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {} FROM applications WHERE 1 = 1",
            APPLICATION_COLUMNS
        ));
        if let Some(student_id) = filter.student_id {
            query.push(" AND student_id = ").push_bind(student_id);
        }
        if let Some(announcement_id) = filter.announcement_id {
            query.push(" AND announcement_id = ").push_bind(announcement_id);
        }
        if let Some(company_id) = filter.company_id {
            query.push(" AND company_id = ").push_bind(company_id);
        }
        query.push(" ORDER BY created_at DESC, rowid DESC");

        let applications = query
            .build_query_as::<Application>()
            .fetch_all(self.pool)
            .await?;

        Ok(applications)
    }

    pub async fn set_status(
        &self,
        id: &str,
        status: ApprovalStatus,
    ) -> Result<Option<Application>> {
        let result = sqlx::query("UPDATE applications SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        info!("Application {} is now {}", id, status.as_str());
        self.find(id).await
    }
}
