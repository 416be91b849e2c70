//! 业务逻辑层（Service）

mod admin_service;
mod cycle_service;
mod draft_service;
mod in_flight;
mod notifier;
mod session_service;
mod submission_service;

pub use admin_service::{AdminService, EXPORT_SUCCESS_MESSAGE};
pub use cycle_service::{CycleService, CYCLE_LOOKUP_FAILED_MESSAGE, ENTER_BATTERY_ID_MESSAGE};
pub use draft_service::{DraftService, RecordForm};
pub use in_flight::{InFlight, InFlightGuard};
pub use notifier::{Notifier, TracingNotifier};
pub use session_service::{SessionService, SESSION_EXPIRED_MESSAGE};
pub use submission_service::{SubmissionService, SUBMISSION_FAILED_MESSAGE};
