use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{header, multipart, Client};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dto::topup::TopUpDraft;
use crate::service::error::ServiceError;
use crate::utils::config::EnvConfig;

/// Lifecycle of a request once the ledger owns it. Creation always comes
/// back `Pending`; approval or rejection happens on the admin side.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TopUpStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TopUpReceipt {
    pub reference: String,
    pub amount: u64,
    pub status: TopUpStatus,
    pub requested_at: DateTime<Utc>,
}

/// External ledger that persists top-up requests and later mutates
/// balances. The dashboard core never owns that state.
#[async_trait]
pub trait TopUpLedger: Send + Sync {
    async fn create_top_up_request(
        &self,
        draft: &TopUpDraft,
        member_id: Uuid,
    ) -> Result<TopUpReceipt, ServiceError>;
}

#[derive(Serialize, Deserialize, Debug)]
struct CreateTopUpResponse {
    pub status: String,
    pub message: String,
    pub data: Option<TopUpReceipt>,
}

pub struct HttpTopUpLedger {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpTopUpLedger {
    pub fn new(config: &EnvConfig) -> HttpTopUpLedger {
        HttpTopUpLedger {
            client: Client::new(),
            base_url: config.ledger_base_url.clone(),
            api_key: config.ledger_api_key.clone(),
        }
    }
}

#[async_trait]
impl TopUpLedger for HttpTopUpLedger {
    async fn create_top_up_request(
        &self,
        draft: &TopUpDraft,
        member_id: Uuid,
    ) -> Result<TopUpReceipt, ServiceError> {
        let amount = draft
            .amount_value()
            .ok_or(ServiceError::MalformedDraft("amount"))?;
        let evidence = draft
            .evidence
            .as_ref()
            .ok_or(ServiceError::MalformedDraft("evidence"))?;

        let evidence_part = multipart::Part::bytes(evidence.bytes.clone())
            .file_name(evidence.file_name.clone())
            .mime_str(&evidence.content_type)?;
        let form = multipart::Form::new()
            .text("amount", amount.to_string())
            .text("topUpMode", draft.top_up_mode.clone())
            .text("accountName", draft.account_name.clone())
            .text("accountNumber", draft.account_number.clone())
            .text("teamMemberId", member_id.to_string())
            .part("file", evidence_part);

        let url = format!("{}/top-up-requests", self.base_url);
        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await?;

        let response_body = response.json::<CreateTopUpResponse>().await?;
        if response_body.status != "success" {
            return Err(ServiceError::Rejected(response_body.message));
        }

        response_body.data.ok_or(ServiceError::MalformedResponse)
    }
}
