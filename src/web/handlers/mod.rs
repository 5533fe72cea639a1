pub mod admin_handlers;
pub mod announcement_handlers;
pub mod application_handlers;
pub mod contact_handlers;
pub mod interview_handlers;
pub mod notification_handlers;
pub mod profile_handlers;
pub mod review_handlers;
pub mod system_handlers;

pub use admin_handlers::*;
pub use announcement_handlers::*;
pub use application_handlers::*;
pub use contact_handlers::*;
pub use interview_handlers::*;
pub use notification_handlers::*;
pub use profile_handlers::*;
pub use review_handlers::*;
pub use system_handlers::*;
