use serde::{Deserialize, Serialize};

use super::user::UserProfile;

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Respuesta de `/auth/login` y `/auth/register`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}
