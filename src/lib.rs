//! Logical core of the wallet member dashboard: the top-up request
//! submission pipeline, the change-password flow, and role-gated view
//! composition. Rendering, routing, persistence, and authentication stay
//! outside; the external ledger, account service, and notification outlet
//! are consumed behind traits.

pub mod dto;
pub mod service;
pub mod utils;

pub use dto::members::{MemberProfile, MemberRole, UserProfile};
pub use dto::password::ChangePasswordBody;
pub use dto::topup::{DestinationAccount, EvidenceFile, TopUpDraft, TopUpMode};
pub use service::account::{PasswordChangeOutcome, PasswordPanel, PasswordService};
pub use service::dialog::DepositDialog;
pub use service::error::ServiceError;
pub use service::ledger::{TopUpLedger, TopUpReceipt, TopUpStatus};
pub use service::notify::{Notification, NotificationSink, NotificationVariant};
pub use service::submission::{SubmissionController, SubmissionOutcome};
pub use utils::capabilities::Capabilities;
