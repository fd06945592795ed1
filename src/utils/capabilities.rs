use crate::dto::members::MemberRole;

/// Navigation chrome and dashboard affordances a role is allowed to see.
/// Every view decision reads from this one resolution so a new role can
/// never fail open in some branches and closed in others.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub sidebar_navigation: bool,
    pub top_navbar: bool,
    pub deposit_action: bool,
}

impl Capabilities {
    pub const fn for_role(role: MemberRole) -> Capabilities {
        match role {
            MemberRole::Member => Capabilities {
                sidebar_navigation: false,
                top_navbar: true,
                deposit_action: true,
            },
            MemberRole::Admin => Capabilities {
                sidebar_navigation: true,
                top_navbar: false,
                deposit_action: false,
            },
        }
    }

    /// Resolution straight from a raw role value, fail-closed on unknowns.
    pub fn for_raw_role(raw: &str) -> Capabilities {
        Capabilities::for_role(MemberRole::from_raw(raw))
    }
}
