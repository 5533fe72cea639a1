// src/core/repos/users.rs
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{Executor, Sqlite, SqlitePool};
use std::collections::HashSet;
use tracing::{info, warn};

use crate::core::models::{ApprovalStatus, EligibleCompany, ProfileInput, User, UserType};

const USER_COLUMNS: &str = "id, user_type, email, first_name, last_name, company_name, bio, \
     location, is_admin, status, profile_completed, experience, created_at";

/// Status update usable inside a transaction
pub(crate) async fn update_company_status<'e, E>(
    executor: E,
    id: &str,
    status: ApprovalStatus,
) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("UPDATE users SET status = ? WHERE id = ? AND user_type = 'company'")
        .bind(status)
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = ?",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Create or replace a profile.
    ///
    /// Admin rights and the creation time are kept. A company keeps its
    /// approval status across edits; a new company profile, or an account
    /// switching to company, starts pending.
    pub async fn upsert_profile(&self, id: &str, input: &ProfileInput) -> Result<User> {
        let existing = self.find(id).await?;
        let status = match input.user_type {
            UserType::Company => existing
                .as_ref()
                .filter(|user| user.is_company())
                .and_then(|user| user.status)
                .or(Some(ApprovalStatus::Pending)),
            UserType::Student => None,
        };
        let is_admin = existing.as_ref().map(|u| u.is_admin).unwrap_or(false);
        let created_at = existing
            .as_ref()
            .map(|u| u.created_at)
            .unwrap_or_else(Utc::now);

        sqlx::query(
            r#"
            INSERT INTO users (id, user_type, email, first_name, last_name, company_name, bio,
                               location, is_admin, status, profile_completed, experience, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, TRUE, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                user_type = excluded.user_type,
                email = excluded.email,
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                company_name = excluded.company_name,
                bio = excluded.bio,
                location = excluded.location,
                status = excluded.status,
                profile_completed = TRUE,
                experience = excluded.experience
            "#,
        )
        .bind(id)
        .bind(input.user_type)
        .bind(&input.email)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.company_name)
        .bind(&input.bio)
        .bind(&input.location)
        .bind(is_admin)
        .bind(status)
        .bind(Json(&input.experience))
        .bind(created_at)
        .execute(self.pool)
        .await?;

        info!("Saved {:?} profile for user {}", input.user_type, id);

        Ok(User {
            id: id.to_string(),
            user_type: input.user_type,
            email: input.email.clone(),
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            company_name: input.company_name.clone(),
            bio: input.bio.clone(),
            location: input.location.clone(),
            is_admin,
            status,
            profile_completed: true,
            experience: input.experience.clone(),
            created_at,
        })
    }

    /// Companies waiting for approval, oldest first
    pub async fn list_pending_companies(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE user_type = 'company' AND status = 'pending' \
             ORDER BY created_at ASC",
            USER_COLUMNS
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Set the approval status of a company, `false` when no such company exists
    pub async fn set_company_status(&self, id: &str, status: ApprovalStatus) -> Result<bool> {
        update_company_status(self.pool, id, status).await
    }

    pub async fn set_admin(&self, id: &str, is_admin: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET is_admin = ? WHERE id = ?")
            .bind(is_admin)
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Companies a student may review: finished experiences at registered
    /// companies, one entry per company.
    pub async fn eligible_companies(
        &self,
        student: &User,
        now: DateTime<Utc>,
    ) -> Result<Vec<EligibleCompany>> {
        let mut seen = HashSet::new();
        let mut eligible = Vec::new();

        for entry in &student.experience {
            let Some(company_id) = entry.company_id.as_deref() else {
                continue;
            };
            if !entry.end_date.is_some_and(|end| end < now) {
                continue;
            }
            if seen.contains(company_id) {
                continue;
            }

            match self.find(company_id).await? {
                Some(company) if company.is_company() => {
                    seen.insert(company_id.to_string());
                    eligible.push(EligibleCompany {
                        id: company.id,
                        company_name: company
                            .company_name
                            .unwrap_or_else(|| "Unknown Company".to_string()),
                        job_title: if entry.title.trim().is_empty() {
                            "Past Role".to_string()
                        } else {
                            entry.title.clone()
                        },
                    });
                }
                _ => warn!(
                    "Experience references {} which is not a registered company",
                    company_id
                ),
            }
        }

        Ok(eligible)
    }
}
