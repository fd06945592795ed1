use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;

use crate::dto::field_messages;
use crate::dto::members::MemberProfile;
use crate::dto::topup::{EvidenceFile, TopUpDraft, TopUpMode};
use crate::service::ledger::TopUpLedger;
use crate::service::notify::{Notification, NotificationSink, NotificationVariant};
use crate::service::submission::{SubmissionController, SubmissionOutcome};

/// Presentation-facing state of the deposit dialog: the draft, its live
/// field errors, and the open flag. Holds the draft exclusively, so a
/// ledger response can never be applied to a dialog that was torn down.
pub struct DepositDialog {
    controller: SubmissionController,
    sink: Arc<dyn NotificationSink>,
    member: MemberProfile,
    draft: TopUpDraft,
    field_errors: HashMap<String, String>,
    open: bool,
}

impl DepositDialog {
    pub fn new(
        ledger: Arc<dyn TopUpLedger>,
        sink: Arc<dyn NotificationSink>,
        member: MemberProfile,
    ) -> DepositDialog {
        DepositDialog {
            controller: SubmissionController::new(ledger),
            sink,
            member,
            draft: TopUpDraft::default(),
            field_errors: HashMap::new(),
            open: false,
        }
    }

    pub fn open(&mut self) {
        self.draft = TopUpDraft::default();
        self.field_errors.clear();
        self.open = true;
    }

    /// Closing discards the draft; nothing survives to the next open.
    pub fn close(&mut self) {
        self.draft = TopUpDraft::default();
        self.field_errors.clear();
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &TopUpDraft {
        &self.draft
    }

    pub fn field_errors(&self) -> &HashMap<String, String> {
        &self.field_errors
    }

    pub fn set_amount(&mut self, raw: &str) {
        self.draft.amount = raw.to_string();
        self.revalidate();
    }

    /// Changing the mode rewrites both destination fields from the
    /// resolver table in one step; they never go stale independently.
    /// Unknown input keeps the previous pair and fails validation instead.
    pub fn set_top_up_mode(&mut self, raw: &str) {
        self.draft.top_up_mode = raw.to_string();
        if let Ok(mode) = raw.parse::<TopUpMode>() {
            let destination = mode.destination();
            self.draft.account_name = destination.account_name.to_string();
            self.draft.account_number = destination.account_number.to_string();
        }
        self.revalidate();
    }

    pub fn set_evidence(&mut self, evidence: Option<EvidenceFile>) {
        self.draft.evidence = evidence;
        self.revalidate();
    }

    pub async fn submit(&mut self) -> SubmissionOutcome {
        let outcome = self.controller.submit(&self.draft, self.member.member_id).await;
        match &outcome {
            SubmissionOutcome::Submitted(_) => {
                self.close();
                self.sink.notify(Notification {
                    title: String::from("Top Up Successfully"),
                    description: Some(String::from("Please wait for it to be approved.")),
                    variant: NotificationVariant::Success,
                });
            }
            SubmissionOutcome::Invalid(errors) => {
                self.field_errors = field_messages(errors);
            }
            SubmissionOutcome::Busy => {}
            SubmissionOutcome::Failed { message } => {
                self.sink.notify(Notification {
                    title: String::from("Error"),
                    description: Some(message.clone()),
                    variant: NotificationVariant::Destructive,
                });
            }
        }
        outcome
    }

    fn revalidate(&mut self) {
        self.field_errors = match self.draft.validate() {
            Ok(()) => HashMap::new(),
            Err(errors) => field_messages(&errors),
        };
    }
}
