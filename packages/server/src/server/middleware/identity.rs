//! Identity extraction middleware.
//!
//! Identity and role determination live upstream (an identity collaborator /
//! gateway). It forwards the authenticated caller as `x-user-id` and
//! `x-user-role` headers; this middleware turns them into an [`ActingUser`]
//! in the request extensions. Requests without valid identity headers
//! continue unauthenticated and are rejected by handlers that require auth.

use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use crate::common::{ActingUser, AppError, Role, UserId};

pub async fn identity_middleware(mut request: Request, next: Next) -> Response {
    if let Some(user) = extract_acting_user(request.headers()) {
        debug!(user_id = %user.id, role = ?user.role, "authenticated request");
        request.extensions_mut().insert(user);
    } else {
        debug!("unauthenticated request");
    }

    next.run(request).await
}

fn extract_acting_user(headers: &HeaderMap) -> Option<ActingUser> {
    let id = headers.get("x-user-id")?.to_str().ok()?;
    let id = UserId::parse(id).ok()?;

    let role: Role = headers
        .get("x-user-role")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("normal")
        .parse()
        .ok()?;

    Some(ActingUser::new(id, role))
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for ActingUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ActingUser>()
            .copied()
            .ok_or_else(|| AppError::Permission("authentication required".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use uuid::Uuid;

    fn headers(id: Option<&str>, role: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(id) = id {
            headers.insert("x-user-id", HeaderValue::from_str(id).unwrap());
        }
        if let Some(role) = role {
            headers.insert("x-user-role", HeaderValue::from_str(role).unwrap());
        }
        headers
    }

    #[test]
    fn extracts_user_with_role() {
        let id = Uuid::new_v4();
        let user = extract_acting_user(&headers(Some(&id.to_string()), Some("admin"))).unwrap();
        assert_eq!(user.id.into_uuid(), id);
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn role_defaults_to_normal() {
        let id = Uuid::new_v4();
        let user = extract_acting_user(&headers(Some(&id.to_string()), None)).unwrap();
        assert_eq!(user.role, Role::Normal);
    }

    #[test]
    fn rejects_missing_or_malformed_id() {
        assert!(extract_acting_user(&headers(None, Some("admin"))).is_none());
        assert!(extract_acting_user(&headers(Some("not-a-uuid"), None)).is_none());
    }

    #[test]
    fn rejects_unknown_role() {
        let id = Uuid::new_v4();
        assert!(extract_acting_user(&headers(Some(&id.to_string()), Some("root"))).is_none());
    }
}
