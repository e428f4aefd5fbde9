use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::env;

/// Token middleware guarding mutating routes.
///
/// Expects `Authorization: Bearer <token>` and validates against the
/// comma-separated `API_TOKENS` environment variable. Tokens must be at
/// least 32 characters of alphanumerics, hyphens, and underscores.
pub async fn require_api_token(headers: HeaderMap, request: Request, next: Next) -> Response {
    let token = match bearer_token(&headers) {
        Ok(token) => token,
        Err(message) => return unauthorized(message),
    };

    if token.len() < 32
        || !token
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return unauthorized("Invalid token format.");
    }

    let valid_tokens = match env::var("API_TOKENS") {
        Ok(tokens) => tokens
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect::<Vec<String>>(),
        Err(_) => {
            tracing::error!("API_TOKENS environment variable not set");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(axum::http::header::CONTENT_TYPE, "application/json")],
                json!({
                    "error": "Internal Server Error",
                    "message": "Authentication is not properly configured on the server."
                })
                .to_string(),
            )
                .into_response();
        }
    };

    if !valid_tokens.iter().any(|t| t == token) {
        return unauthorized("Invalid or expired token.");
    }

    next.run(request).await
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, &'static str> {
    let header = headers
        .get("authorization")
        .ok_or("Missing Authorization header. Please provide a Bearer token.")?;

    let value = header
        .to_str()
        .map_err(|_| "Invalid Authorization header format.")?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or("Authorization header must use Bearer scheme (e.g., 'Authorization: Bearer <token>').")
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(axum::http::header::CONTENT_TYPE, "application/json")],
        json!({
            "error": "Unauthorized",
            "message": message
        })
        .to_string(),
    )
        .into_response()
}
