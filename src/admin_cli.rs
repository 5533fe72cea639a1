// src/admin_cli.rs
use anyhow::Result;
use clap::Subcommand;
use std::path::Path;
use tracing::error;

use crate::core::approvals;
use crate::core::models::ApprovalStatus;
use crate::core::repos::UserRepository;
use crate::core::Database;

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// List companies waiting for approval
    Pending,
    /// Approve a company account
    Approve { company_id: String },
    /// Reject a company account
    Reject { company_id: String },
    /// Grant or revoke administrator rights
    Grant {
        user_id: String,
        #[arg(long)]
        revoke: bool,
    },
}

pub async fn handle_admin_command(command: AdminCommand, database_path: &Path) -> Result<()> {
    let db = Database::new(database_path).await?;
    let users = UserRepository::new(db.pool());

    match command {
        AdminCommand::Pending => {
            let pending = users.list_pending_companies().await?;
            if pending.is_empty() {
                println!("No companies waiting for approval.");
                return Ok(());
            }

            println!("{:<30} {:<25} {:<30} {:<20}", "ID", "Company", "Email", "Created");
            println!("{}", "-".repeat(105));
            for company in pending {
                println!(
                    "{:<30} {:<25} {:<30} {:<20}",
                    company.id,
                    company.company_name.as_deref().unwrap_or("-"),
                    company.email,
                    company.created_at.format("%Y-%m-%d %H:%M")
                );
            }
        }

        AdminCommand::Approve { company_id } => {
            review_company(&db, &company_id, ApprovalStatus::Approved).await?
        }

        AdminCommand::Reject { company_id } => {
            review_company(&db, &company_id, ApprovalStatus::Rejected).await?
        }

        AdminCommand::Grant { user_id, revoke } => {
            match users.set_admin(&user_id, !revoke).await {
                Ok(true) if revoke => println!("✅ Admin rights revoked for {}", user_id),
                Ok(true) => println!("✅ {} is now an administrator", user_id),
                Ok(false) => println!("❌ No user found with id {}", user_id),
                Err(e) => {
                    error!("Failed to update admin flag: {}", e);
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}

async fn review_company(db: &Database, company_id: &str, decision: ApprovalStatus) -> Result<()> {
    if approvals::review_company(db, company_id, decision).await? {
        println!("✅ Company {} is now {}", company_id, decision.as_str());
    } else {
        println!("❌ No company found with id {}", company_id);
    }
    Ok(())
}
