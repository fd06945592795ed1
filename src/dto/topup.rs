use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use validator::{Validate, ValidationError};

use crate::utils::sanitize::escape_string;

pub const MAX_EVIDENCE_BYTES: usize = 5 * 1024 * 1024; // 5MB limit
pub const ALLOWED_EVIDENCE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/jpg"];

/// Channel the member sent funds through. Each mode has a fixed
/// destination account the member must have paid into.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TopUpMode {
    Gcash,
    Gotyme,
}

#[derive(Error, Debug)]
#[error("Unknown top up mode: {0}")]
pub struct UnknownTopUpMode(String);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DestinationAccount {
    pub account_name: &'static str,
    pub account_number: &'static str,
}

impl TopUpMode {
    pub const ALL: [TopUpMode; 2] = [TopUpMode::Gcash, TopUpMode::Gotyme];

    /// Fixed destination pair for this mode. Both fields come from the
    /// same table entry so they can never mix across modes.
    pub const fn destination(self) -> DestinationAccount {
        match self {
            TopUpMode::Gcash => DestinationAccount {
                account_name: "Test User 1",
                account_number: "1234567890",
            },
            TopUpMode::Gotyme => DestinationAccount {
                account_name: "Test User 2",
                account_number: "987654321",
            },
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            TopUpMode::Gcash => "GCASH",
            TopUpMode::Gotyme => "GOTYME",
        }
    }
}

impl FromStr for TopUpMode {
    type Err = UnknownTopUpMode;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "GCASH" => Ok(TopUpMode::Gcash),
            "GOTYME" => Ok(TopUpMode::Gotyme),
            other => Err(UnknownTopUpMode(other.to_string())),
        }
    }
}

impl fmt::Display for TopUpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Proof-of-payment attachment as handed over by the upload widget. The
/// core only ever inspects the declared content type and byte size.
/// Serialization carries the metadata only, never the raw bytes.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct EvidenceFile {
    pub file_name: String,
    pub content_type: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl EvidenceFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[derive(Validate, Serialize, Clone, Debug)]
pub struct TopUpDraft {
    #[validate(
        length(min = 1, message = "Amount is required"),
        custom(function = "validate_amount", message = "Amount must be a number")
    )]
    pub amount: String,

    #[validate(
        length(min = 1, message = "Top up mode is required"),
        custom(function = "validate_top_up_mode", message = "Unknown top up mode")
    )]
    pub top_up_mode: String,

    #[validate(length(min = 1, message = "Field is required"))]
    pub account_name: String,

    #[validate(length(min = 1, message = "Field is required"))]
    pub account_number: String,

    #[serde(skip)]
    #[validate(
        required(message = "File is required"),
        custom(
            function = "validate_evidence",
            message = "File must be a valid image and less than 5MB."
        )
    )]
    pub evidence: Option<EvidenceFile>,
}

impl Default for TopUpDraft {
    fn default() -> Self {
        let destination = TopUpMode::Gcash.destination();
        TopUpDraft {
            amount: String::new(),
            top_up_mode: TopUpMode::Gcash.as_str().to_string(),
            account_name: destination.account_name.to_string(),
            account_number: destination.account_number.to_string(),
            evidence: None,
        }
    }
}

impl TopUpDraft {
    /// Copy of the draft with every string field escaped. The evidence
    /// attachment passes through untouched.
    pub fn sanitized(&self) -> TopUpDraft {
        TopUpDraft {
            amount: escape_string(&self.amount),
            top_up_mode: escape_string(&self.top_up_mode),
            account_name: escape_string(&self.account_name),
            account_number: escape_string(&self.account_number),
            evidence: self.evidence.clone(),
        }
    }

    /// Amount as integer currency units. `None` when the draft has not
    /// passed validation yet or the value overflows.
    pub fn amount_value(&self) -> Option<u64> {
        self.amount.parse().ok()
    }
}

fn validate_amount(amount: &str) -> Result<(), ValidationError> {
    if amount.chars().all(|ch| ch.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("amount_not_numeric"))
    }
}

// The empty case belongs to the length rule, so the two errors never stack.
fn validate_top_up_mode(mode: &str) -> Result<(), ValidationError> {
    if mode.is_empty() || mode.parse::<TopUpMode>().is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_top_up_mode"))
    }
}

fn validate_evidence(evidence: &EvidenceFile) -> Result<(), ValidationError> {
    let valid_type = ALLOWED_EVIDENCE_TYPES.contains(&evidence.content_type.as_str());
    if !valid_type || evidence.size() > MAX_EVIDENCE_BYTES {
        return Err(ValidationError::new("invalid_evidence"));
    }
    Ok(())
}
