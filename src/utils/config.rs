use std::env::var;

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub app_name: String,
    pub ledger_base_url: String,
    pub ledger_api_key: String,
    pub auth_base_url: String,
}

impl EnvConfig {
    pub fn init() -> EnvConfig {
        EnvConfig {
            app_name: var("APP_NAME").unwrap_or(String::from("member-dashboard-v1")),
            ledger_base_url: var("LEDGER_BASE_URL").expect("Missing env LEDGER_BASE_URL"),
            ledger_api_key: var("LEDGER_API_KEY").expect("Missing env LEDGER_API_KEY"),
            auth_base_url: var("AUTH_BASE_URL").expect("Missing env AUTH_BASE_URL"),
        }
    }
}
