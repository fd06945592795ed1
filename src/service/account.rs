use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, instrument};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::dto::field_messages;
use crate::dto::members::UserProfile;
use crate::dto::password::ChangePasswordBody;
use crate::service::error::ServiceError;
use crate::service::notify::{Notification, NotificationSink, NotificationVariant};
use crate::service::submission::FlightGuard;
use crate::utils::config::EnvConfig;

/// Account service owning credential updates. Consumed, never implemented
/// against real storage here.
#[async_trait]
pub trait PasswordService: Send + Sync {
    async fn change_user_password(
        &self,
        user_id: Uuid,
        email: &str,
        password: &str,
    ) -> Result<(), ServiceError>;
}

#[derive(Deserialize, Debug)]
struct ChangePasswordResponse {
    pub status: String,
    pub message: String,
}

pub struct HttpPasswordService {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpPasswordService {
    pub fn new(config: &EnvConfig) -> HttpPasswordService {
        HttpPasswordService {
            client: Client::new(),
            base_url: config.auth_base_url.clone(),
            api_key: config.ledger_api_key.clone(),
        }
    }
}

#[async_trait]
impl PasswordService for HttpPasswordService {
    async fn change_user_password(
        &self,
        user_id: Uuid,
        email: &str,
        password: &str,
    ) -> Result<(), ServiceError> {
        let url = format!("{}/auth/change-password", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "userId": user_id, "email": email, "password": password }))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .send()
            .await?;

        let response_body = response.json::<ChangePasswordResponse>().await?;
        if response_body.status != "success" {
            return Err(ServiceError::Rejected(response_body.message));
        }

        Ok(())
    }
}

#[derive(Debug)]
pub enum PasswordChangeOutcome {
    Changed,
    Invalid(ValidationErrors),
    Busy,
    Failed { message: String },
}

/// Change-password form state for one profile card. Same pipeline shape
/// as the deposit dialog, without the dialog chrome.
pub struct PasswordPanel {
    service: Arc<dyn PasswordService>,
    sink: Arc<dyn NotificationSink>,
    user: UserProfile,
    form: ChangePasswordBody,
    field_errors: HashMap<String, String>,
    in_flight: AtomicBool,
}

impl PasswordPanel {
    pub fn new(
        service: Arc<dyn PasswordService>,
        sink: Arc<dyn NotificationSink>,
        user: UserProfile,
    ) -> PasswordPanel {
        PasswordPanel {
            service,
            sink,
            user,
            form: ChangePasswordBody::default(),
            field_errors: HashMap::new(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn form(&self) -> &ChangePasswordBody {
        &self.form
    }

    pub fn field_errors(&self) -> &HashMap<String, String> {
        &self.field_errors
    }

    pub fn set_password(&mut self, raw: &str) {
        self.form.password = raw.to_string();
        self.revalidate();
    }

    pub fn set_confirm_password(&mut self, raw: &str) {
        self.form.confirm_password = raw.to_string();
        self.revalidate();
    }

    #[instrument(skip(self), fields(user_id = %self.user.user_id))]
    pub async fn submit(&mut self) -> PasswordChangeOutcome {
        if self.in_flight.load(Ordering::Acquire) {
            return PasswordChangeOutcome::Busy;
        }

        if let Err(errors) = self.form.validate() {
            self.field_errors = field_messages(&errors);
            return PasswordChangeOutcome::Invalid(errors);
        }

        let _guard = match FlightGuard::acquire(&self.in_flight) {
            Some(guard) => guard,
            None => return PasswordChangeOutcome::Busy,
        };

        let sanitized = self.form.sanitized();
        let result = self
            .service
            .change_user_password(self.user.user_id, &self.user.email, &sanitized.password)
            .await;

        match result {
            Ok(()) => {
                self.form = ChangePasswordBody::default();
                self.field_errors.clear();
                self.sink.notify(Notification {
                    title: String::from("Password Change Successfully"),
                    description: None,
                    variant: NotificationVariant::Success,
                });
                PasswordChangeOutcome::Changed
            }
            Err(err) => {
                // The profile card never echoes a service message back.
                error!("Error changing user password ===> {}", err);
                self.sink.notify(Notification {
                    title: String::from("Something went wrong"),
                    description: None,
                    variant: NotificationVariant::Destructive,
                });
                PasswordChangeOutcome::Failed {
                    message: err.user_message(),
                }
            }
        }
    }

    fn revalidate(&mut self) {
        self.field_errors = match self.form.validate() {
            Ok(()) => HashMap::new(),
            Err(errors) => field_messages(&errors),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    struct RecordingService {
        calls: AtomicUsize,
        result: Mutex<Option<Result<(), ServiceError>>>,
        seen_password: Mutex<Option<String>>,
    }

    impl RecordingService {
        fn returning(result: Result<(), ServiceError>) -> Arc<RecordingService> {
            Arc::new(RecordingService {
                calls: AtomicUsize::new(0),
                result: Mutex::new(Some(result)),
                seen_password: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl PasswordService for RecordingService {
        async fn change_user_password(
            &self,
            _user_id: Uuid,
            _email: &str,
            password: &str,
        ) -> Result<(), ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen_password.lock().unwrap() = Some(password.to_string());
            self.result
                .lock()
                .unwrap()
                .take()
                .expect("service called more than once")
        }
    }

    struct CollectingSink {
        notifications: Mutex<Vec<Notification>>,
    }

    impl CollectingSink {
        fn new() -> Arc<CollectingSink> {
            Arc::new(CollectingSink {
                notifications: Mutex::new(Vec::new()),
            })
        }
    }

    impl NotificationSink for CollectingSink {
        fn notify(&self, notification: Notification) {
            self.notifications.lock().unwrap().push(notification);
        }
    }

    fn panel(
        service: Arc<RecordingService>,
        sink: Arc<CollectingSink>,
    ) -> PasswordPanel {
        PasswordPanel::new(
            service,
            sink,
            UserProfile {
                user_id: Uuid::new_v4(),
                email: String::from("member@example.com"),
            },
        )
    }

    #[tokio::test]
    async fn mismatch_never_reaches_the_service() {
        let service = RecordingService::returning(Ok(()));
        let sink = CollectingSink::new();
        let mut panel = panel(service.clone(), sink.clone());

        panel.set_password("hunter22");
        panel.set_confirm_password("hunter23");
        let outcome = panel.submit().await;

        assert!(matches!(outcome, PasswordChangeOutcome::Invalid(_)));
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
        assert!(sink.notifications.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn successful_change_resets_form_and_notifies() {
        let service = RecordingService::returning(Ok(()));
        let sink = CollectingSink::new();
        let mut panel = panel(service.clone(), sink.clone());

        panel.set_password("hunter22");
        panel.set_confirm_password("hunter22");
        let outcome = panel.submit().await;

        assert!(matches!(outcome, PasswordChangeOutcome::Changed));
        assert_eq!(panel.form().password, "");
        assert_eq!(panel.form().confirm_password, "");

        let notifications = sink.notifications.lock().unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].title, "Password Change Successfully");
        assert_eq!(notifications[0].variant, NotificationVariant::Success);
    }

    #[tokio::test]
    async fn failure_notifies_generic_title_and_keeps_form() {
        let service = RecordingService::returning(Err(ServiceError::Rejected(String::from(
            "Password recently used",
        ))));
        let sink = CollectingSink::new();
        let mut panel = panel(service, sink.clone());

        panel.set_password("hunter22");
        panel.set_confirm_password("hunter22");
        let outcome = panel.submit().await;

        assert!(matches!(outcome, PasswordChangeOutcome::Failed { .. }));
        assert_eq!(panel.form().password, "hunter22");

        let notifications = sink.notifications.lock().unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].title, "Something went wrong");
        assert_eq!(notifications[0].variant, NotificationVariant::Destructive);
    }

    #[tokio::test]
    async fn submitted_password_is_sanitized() {
        let service = RecordingService::returning(Ok(()));
        let sink = CollectingSink::new();
        let mut panel = panel(service.clone(), sink);

        panel.set_password("pass<x>word");
        panel.set_confirm_password("pass<x>word");
        let _ = panel.submit().await;

        assert_eq!(
            service.seen_password.lock().unwrap().as_deref(),
            Some("pass&lt;x&gt;word")
        );
    }
}
