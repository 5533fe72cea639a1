// src/core/approvals.rs
//! Company approval shared by the admin routes and the admin CLI

use anyhow::Result;
use tracing::info;

use crate::core::models::{ApprovalStatus, Notification, NotificationData, NotificationType};
use crate::core::notifier::NotificationChange;
use crate::core::repos::{notifications, users};
use crate::core::Database;

/// Set a company's status and notify it; `false` when no such company exists.
///
/// The status change and the notification are committed together.
pub async fn review_company(
    db: &Database,
    company_id: &str,
    decision: ApprovalStatus,
) -> Result<bool> {
    let mut tx = db.pool().begin().await?;
    if !users::update_company_status(&mut *tx, company_id, decision).await? {
        return Ok(false);
    }

    let notification = match decision {
        ApprovalStatus::Approved => Some(Notification::new(
            company_id,
            NotificationType::Approval,
            "Contul companiei tale a fost aprobat",
            NotificationData::default(),
        )),
        ApprovalStatus::Rejected => Some(Notification::new(
            company_id,
            NotificationType::Rejection,
            "Contul companiei tale a fost respins",
            NotificationData::default(),
        )),
        ApprovalStatus::Pending => None,
    };
    if let Some(notification) = &notification {
        notifications::insert(&mut *tx, notification).await?;
    }
    tx.commit().await?;

    if let Some(notification) = notification {
        db.notifier()
            .publish(company_id, NotificationChange::Created { notification });
    }
    info!("Company {} is now {}", company_id, decision.as_str());
    Ok(true)
}
