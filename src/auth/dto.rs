use serde::{Deserialize, Serialize};

/// Request body for registration. `guestId` carries the client-local guest
/// identity whose stats should be merged into the new account.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub guest_id: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for both register and login. The token is a bearer-style random
/// id regenerated on every login; no endpoint validates it yet.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub email: String,
    pub token: String,
}
