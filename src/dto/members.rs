use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Role attached to a membership row. Anything the session layer hands us
/// that we do not recognize resolves to `Member`, the most restricted role.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum MemberRole {
    Member,
    Admin,
}

impl MemberRole {
    /// Fail-closed parse of a raw role string.
    pub fn from_raw(raw: &str) -> MemberRole {
        match raw {
            "ADMIN" => MemberRole::Admin,
            _ => MemberRole::Member,
        }
    }
}

impl<'de> Deserialize<'de> for MemberRole {
    fn deserialize<D>(deserializer: D) -> Result<MemberRole, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(MemberRole::from_raw(&raw))
    }
}

/// Membership identity as resolved by the session layer. Read-only here.
#[derive(Deserialize, Clone, Debug)]
pub struct MemberProfile {
    pub member_id: Uuid,
    pub role: MemberRole,
}

/// Account identity backing a membership, used by the password flow.
#[derive(Deserialize, Clone, Debug)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub email: String,
}
