// src/core/repos/reviews.rs
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::core::models::CompanyReview;

pub struct ReviewRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ReviewRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        company_id: &str,
        student_id: &str,
        student_name: &str,
        rating: i64,
        comment: &str,
    ) -> Result<CompanyReview> {
        let review = CompanyReview {
            id: Uuid::new_v4().to_string(),
            company_id: company_id.to_string(),
            student_id: student_id.to_string(),
            student_name: student_name.to_string(),
            rating,
            comment: comment.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO company_reviews (id, company_id, student_id, student_name, rating,
                                         comment, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&review.id)
        .bind(&review.company_id)
        .bind(&review.student_id)
        .bind(&review.student_name)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.created_at)
        .execute(self.pool)
        .await?;

        info!("Stored review {} for company {}", review.id, company_id);
        Ok(review)
    }

    /// Reviews of a company, newest first
    pub async fn list_for_company(&self, company_id: &str) -> Result<Vec<CompanyReview>> {
        let reviews = sqlx::query_as::<_, CompanyReview>(
            r#"
            SELECT id, company_id, student_id, student_name, rating, comment, created_at
            FROM company_reviews
            WHERE company_id = ?
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(company_id)
        .fetch_all(self.pool)
        .await?;

        Ok(reviews)
    }
}

/// Mean rating, `None` without reviews
pub fn average_rating(reviews: &[CompanyReview]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let total: i64 = reviews.iter().map(|r| r.rating).sum();
    Some(total as f64 / reviews.len() as f64)
}
