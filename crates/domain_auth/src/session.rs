//! Authenticated session data

use serde::{Deserialize, Serialize};

use core_kernel::UserId;

/// Identity of a logged-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: UserId,
    pub phone_number: String,
}

/// Token and identity issued by a successful OTP verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: AuthUser,
}
