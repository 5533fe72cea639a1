// src/core/repos/mod.rs
//! One repository per stored collection

pub mod announcements;
pub mod applications;
pub mod notifications;
pub mod reviews;
pub mod users;

pub use announcements::AnnouncementRepository;
pub use applications::{ApplicationFilter, ApplicationRepository};
pub use notifications::{NotificationRepository, DEFAULT_NOTIFICATION_LIMIT};
pub use reviews::{average_rating, ReviewRepository};
pub use users::UserRepository;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{
        AnnouncementInput, ApprovalStatus, ExperienceEntry, NotificationData, NotificationType,
        ProfileInput, UserType,
    };
    use crate::core::{Database, NotificationChange};
    use chrono::{Duration, Utc};

    fn company_input(name: &str) -> ProfileInput {
        ProfileInput {
            user_type: UserType::Company,
            email: format!("hr@{}.ro", name.to_lowercase()),
            first_name: None,
            last_name: None,
            company_name: Some(name.to_string()),
            bio: None,
            location: Some("Cluj".to_string()),
            experience: vec![],
        }
    }

    fn student_input(experience: Vec<ExperienceEntry>) -> ProfileInput {
        ProfileInput {
            user_type: UserType::Student,
            email: "ana@student.ro".to_string(),
            first_name: Some("Ana".to_string()),
            last_name: Some("Pop".to_string()),
            company_name: None,
            bio: None,
            location: None,
            experience,
        }
    }

    fn experience(company_id: &str, ended_days_ago: Option<i64>) -> ExperienceEntry {
        ExperienceEntry {
            title: "Intern".to_string(),
            company: "x".to_string(),
            company_id: Some(company_id.to_string()),
            start_date: Some(Utc::now() - Duration::days(400)),
            end_date: ended_days_ago.map(|d| Utc::now() - Duration::days(d)),
        }
    }

    fn announcement_input() -> AnnouncementInput {
        AnnouncementInput {
            title: "Rust Intern".to_string(),
            description: "Services".to_string(),
            requirements: "Rust".to_string(),
            location: "Remote".to_string(),
            job_type: "internship".to_string(),
            is_remote: true,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_company_edit_keeps_approval_and_admin() {
        let db = Database::in_memory().await.unwrap();
        let users = UserRepository::new(db.pool());

        let created = users.upsert_profile("c1", &company_input("Acme")).await.unwrap();
        assert_eq!(created.status, Some(ApprovalStatus::Pending));
        users.set_admin("c1", true).await.unwrap();
        users
            .set_company_status("c1", ApprovalStatus::Approved)
            .await
            .unwrap();

        let mut edited = company_input("Acme");
        edited.bio = Some("We build Rust services".to_string());
        let saved = users.upsert_profile("c1", &edited).await.unwrap();
        assert_eq!(saved.status, Some(ApprovalStatus::Approved));
        assert!(saved.is_admin);

        let stored = users.find("c1").await.unwrap().unwrap();
        assert_eq!(stored.status, Some(ApprovalStatus::Approved));
        assert_eq!(stored.bio.as_deref(), Some("We build Rust services"));
        assert!(stored.is_approved_company());
        assert!(users.list_pending_companies().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_student_switching_to_company_starts_pending() {
        let db = Database::in_memory().await.unwrap();
        let users = UserRepository::new(db.pool());

        let student = users.upsert_profile("u1", &student_input(vec![])).await.unwrap();
        assert_eq!(student.status, None);

        let company = users.upsert_profile("u1", &company_input("Acme")).await.unwrap();
        assert_eq!(company.status, Some(ApprovalStatus::Pending));
        assert_eq!(users.list_pending_companies().await.unwrap().len(), 1);

        let back = users.upsert_profile("u1", &student_input(vec![])).await.unwrap();
        assert_eq!(back.status, None);
    }

    #[tokio::test]
    async fn test_set_status_only_applies_to_companies() {
        let db = Database::in_memory().await.unwrap();
        let users = UserRepository::new(db.pool());
        users.upsert_profile("s1", &student_input(vec![])).await.unwrap();

        assert!(!users
            .set_company_status("s1", ApprovalStatus::Approved)
            .await
            .unwrap());
        assert!(!users
            .set_company_status("missing", ApprovalStatus::Approved)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_eligible_companies_filters_and_dedupes() {
        let db = Database::in_memory().await.unwrap();
        let users = UserRepository::new(db.pool());
        users.upsert_profile("c1", &company_input("Acme")).await.unwrap();
        users.upsert_profile("c2", &company_input("Globex")).await.unwrap();
        users.upsert_profile("s2", &student_input(vec![])).await.unwrap();

        let student = users
            .upsert_profile(
                "s1",
                &student_input(vec![
                    experience("c1", Some(30)),
                    experience("c1", Some(10)),
                    experience("c2", None),
                    experience("s2", Some(5)),
                    experience("ghost", Some(5)),
                ]),
            )
            .await
            .unwrap();

        let eligible = users.eligible_companies(&student, Utc::now()).await.unwrap();
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].id, "c1");
        assert_eq!(eligible[0].company_name, "Acme");
        assert_eq!(eligible[0].job_title, "Intern");
    }

    #[tokio::test]
    async fn test_experience_round_trips_through_json_column() {
        let db = Database::in_memory().await.unwrap();
        let users = UserRepository::new(db.pool());
        users
            .upsert_profile("s1", &student_input(vec![experience("c1", Some(3))]))
            .await
            .unwrap();

        let stored = users.find("s1").await.unwrap().unwrap();
        assert_eq!(stored.experience.len(), 1);
        assert_eq!(stored.experience[0].company_id.as_deref(), Some("c1"));
        assert_eq!(stored.display_name(), "Ana Pop");
    }

    #[tokio::test]
    async fn test_announcement_lifecycle() {
        let db = Database::in_memory().await.unwrap();
        let users = UserRepository::new(db.pool());
        let announcements = AnnouncementRepository::new(db.pool());
        let company = users.upsert_profile("c1", &company_input("Acme")).await.unwrap();

        let created = announcements
            .create(&company, &announcement_input())
            .await
            .unwrap();
        assert_eq!(created.company_name, "Acme");
        assert_eq!(created.status, ApprovalStatus::Approved);

        let mut edit = announcement_input();
        edit.title = "Senior Rust Intern".to_string();
        let updated = announcements.update(&created.id, &edit).await.unwrap().unwrap();
        assert_eq!(updated.title, "Senior Rust Intern");

        assert_eq!(announcements.list_approved().await.unwrap().len(), 1);
        assert_eq!(announcements.list_for_company("c1").await.unwrap().len(), 1);
        assert!(announcements.update("missing", &edit).await.unwrap().is_none());

        assert!(announcements.delete(&created.id).await.unwrap());
        assert!(announcements.find(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_applications_are_unique_per_student() {
        let db = Database::in_memory().await.unwrap();
        let users = UserRepository::new(db.pool());
        let announcements = AnnouncementRepository::new(db.pool());
        let applications = ApplicationRepository::new(db.pool());
        let company = users.upsert_profile("c1", &company_input("Acme")).await.unwrap();
        let announcement = announcements
            .create(&company, &announcement_input())
            .await
            .unwrap();

        let application = applications
            .create(&announcement, "s1", Some("Hello".to_string()))
            .await
            .unwrap();
        assert_eq!(application.company_id, "c1");
        assert!(applications.exists(&announcement.id, "s1").await.unwrap());
        assert!(applications.create(&announcement, "s1", None).await.is_err());

        applications.create(&announcement, "s2", None).await.unwrap();
        let by_student = ApplicationFilter {
            student_id: Some("s1"),
            ..Default::default()
        };
        assert_eq!(applications.list(&by_student).await.unwrap().len(), 1);
        let by_company = ApplicationFilter {
            company_id: Some("c1"),
            announcement_id: Some(&announcement.id),
            ..Default::default()
        };
        assert_eq!(applications.list(&by_company).await.unwrap().len(), 2);

        let approved = applications
            .set_status(&application.id, ApprovalStatus::Approved)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(approved.status, ApprovalStatus::Approved);
    }

    #[tokio::test]
    async fn test_notifications_newest_first_with_unread_count() {
        let db = Database::in_memory().await.unwrap();
        let notifications = NotificationRepository::new(&db);

        let mut ids = Vec::new();
        for n in 0..12 {
            let created = notifications
                .create(
                    "u1",
                    NotificationType::Application,
                    &format!("Application {}", n),
                    NotificationData::default(),
                )
                .await
                .unwrap();
            ids.push(created.id);
        }

        let latest = notifications
            .list_for_user("u1", DEFAULT_NOTIFICATION_LIMIT)
            .await
            .unwrap();
        assert_eq!(latest.len(), 10);
        assert_eq!(latest[0].message, "Application 11");

        assert!(notifications.mark_read(&ids[0]).await.unwrap());
        assert_eq!(notifications.unread_count("u1").await.unwrap(), 11);
        assert_eq!(notifications.mark_all_read("u1").await.unwrap(), 11);
        assert_eq!(notifications.unread_count("u1").await.unwrap(), 0);

        assert!(notifications.delete(&ids[1]).await.unwrap());
        assert_eq!(notifications.delete_all("u1").await.unwrap(), 10);
        assert!(notifications.list_for_user("u1", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_notification_changes_are_published() {
        let db = Database::in_memory().await.unwrap();
        let notifications = NotificationRepository::new(&db);
        let mut events = db.notifier().subscribe();

        let created = notifications
            .create(
                "u1",
                NotificationType::Approval,
                "Aprobat",
                NotificationData::default(),
            )
            .await
            .unwrap();
        assert!(notifications.mark_read(&created.id).await.unwrap());
        assert!(notifications.delete(&created.id).await.unwrap());
        assert!(!notifications.delete(&created.id).await.unwrap());
        assert_eq!(notifications.delete_all("u1").await.unwrap(), 0);

        let event = events.recv().await.unwrap();
        assert_eq!(event.user_id, "u1");
        assert!(
            matches!(event.change, NotificationChange::Created { ref notification } if notification.id == created.id)
        );
        let event = events.recv().await.unwrap();
        assert!(matches!(event.change, NotificationChange::Read { ref id } if *id == created.id));
        let event = events.recv().await.unwrap();
        assert_eq!(event.user_id, "u1");
        assert!(matches!(event.change, NotificationChange::Deleted { ref id } if *id == created.id));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_reviews_and_average() {
        let db = Database::in_memory().await.unwrap();
        let reviews = ReviewRepository::new(db.pool());

        reviews.create("c1", "s1", "Ana Pop", 5, "Great").await.unwrap();
        reviews.create("c1", "s2", "Anonim", 2, "Meh").await.unwrap();
        reviews.create("c2", "s1", "Ana Pop", 4, "Ok").await.unwrap();

        let list = reviews.list_for_company("c1").await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].comment, "Meh");
        assert_eq!(average_rating(&list), Some(3.5));
        assert_eq!(average_rating(&[]), None);
    }
}
