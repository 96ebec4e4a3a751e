// src/utils/role.rs

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    middleware::Next,
    response::Response,
};

/// Header carrying the UI mode the client is currently in.
pub const ROLE_HEADER: &str = "x-user-role";

/// UI mode of the caller. Admin unlocks add/delete affordances; it is not an
/// authenticated identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Student,
    Admin,
}

impl Role {
    /// Anything other than an explicit `admin` falls back to student.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        match headers.get(ROLE_HEADER).and_then(|v| v.to_str().ok()) {
            Some(value) if value.trim().eq_ignore_ascii_case("admin") => Role::Admin,
            _ => Role::Student,
        }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

/// Axum Middleware: resolves the caller's `Role` and injects it into the
/// request extensions for handlers to use.
pub async fn role_middleware(mut req: Request<Body>, next: Next) -> Response {
    let role = Role::from_headers(req.headers());
    req.extensions_mut().insert(role);
    next.run(req).await
}

/// Axum Middleware: Admin gate.
///
/// Must be used AFTER `role_middleware`. Returns 403 Forbidden unless the
/// injected `Role` is admin.
pub async fn admin_middleware(req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let role = req
        .extensions()
        .get::<Role>()
        .copied()
        .unwrap_or_default();

    if !role.is_admin() {
        tracing::warn!("Blocked admin-only {} {}", req.method(), req.uri().path());
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_role_defaults_to_student() {
        let headers = HeaderMap::new();
        assert_eq!(Role::from_headers(&headers), Role::Student);
    }

    #[test]
    fn test_role_admin_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert(ROLE_HEADER, HeaderValue::from_static("Admin"));
        assert_eq!(Role::from_headers(&headers), Role::Admin);
    }

    #[test]
    fn test_unknown_role_is_student() {
        let mut headers = HeaderMap::new();
        headers.insert(ROLE_HEADER, HeaderValue::from_static("teacher"));
        assert_eq!(Role::from_headers(&headers), Role::Student);
    }
}
