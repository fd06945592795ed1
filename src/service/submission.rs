use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, instrument};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::dto::topup::TopUpDraft;
use crate::service::ledger::{TopUpLedger, TopUpReceipt};

/// Discriminated result of one submit attempt. Notification is the
/// caller's concern; nothing here touches the UI.
#[derive(Debug)]
pub enum SubmissionOutcome {
    Submitted(TopUpReceipt),
    Invalid(ValidationErrors),
    Busy,
    Failed { message: String },
}

/// Releases the in-flight flag on every exit path, early returns and
/// panics included.
pub(crate) struct FlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> FlightGuard<'a> {
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<FlightGuard<'a>> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FlightGuard { flag })
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Runs the validate -> sanitize -> submit sequence for one form
/// instance, with at most one ledger call in flight at a time.
pub struct SubmissionController {
    ledger: Arc<dyn TopUpLedger>,
    in_flight: AtomicBool,
}

impl SubmissionController {
    pub fn new(ledger: Arc<dyn TopUpLedger>) -> SubmissionController {
        SubmissionController {
            ledger,
            in_flight: AtomicBool::new(false),
        }
    }

    #[instrument(skip(self, draft), fields(member_id = %member_id, amount = %draft.amount))]
    pub async fn submit(&self, draft: &TopUpDraft, member_id: Uuid) -> SubmissionOutcome {
        if self.in_flight.load(Ordering::Acquire) {
            return SubmissionOutcome::Busy;
        }

        // Validation failures must not flip the in-flight flag.
        if let Err(errors) = draft.validate() {
            return SubmissionOutcome::Invalid(errors);
        }

        let _guard = match FlightGuard::acquire(&self.in_flight) {
            Some(guard) => guard,
            None => return SubmissionOutcome::Busy,
        };

        let sanitized = draft.sanitized();
        match self.ledger.create_top_up_request(&sanitized, member_id).await {
            Ok(receipt) => SubmissionOutcome::Submitted(receipt),
            Err(err) => {
                error!("Error creating top up request ===> {}", err);
                SubmissionOutcome::Failed {
                    message: err.user_message(),
                }
            }
        }
    }
}
