//! Auth Endpoints

use super::ApiClient;
use crate::error::AppResult;
use crate::models::{Credentials, LoginResponse};

/// `POST /auth/login`, returns the bearer token
pub async fn login(api: &ApiClient, credentials: &Credentials) -> AppResult<String> {
    let response: LoginResponse = api.send_json_anonymous(api.post(&["auth", "login"]).json(credentials)).await?;
    Ok(response.token)
}
