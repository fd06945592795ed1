pub mod account;
pub mod dialog;
pub mod error;
pub mod ledger;
pub mod notify;
pub mod submission;
