use serde::Serialize;
use validator::Validate;

use crate::utils::sanitize::escape_string;

#[derive(Validate, Serialize, Clone, Debug, Default)]
pub struct ChangePasswordBody {
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(
        length(min = 6, message = "Confirm Password must be at least 6 characters"),
        must_match(other = "password", message = "The passwords did not match")
    )]
    pub confirm_password: String,
}

impl ChangePasswordBody {
    pub fn sanitized(&self) -> ChangePasswordBody {
        ChangePasswordBody {
            password: escape_string(&self.password),
            confirm_password: escape_string(&self.confirm_password),
        }
    }
}
