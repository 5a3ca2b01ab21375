use crate::{error::ApiError, model::role::Role};
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, error::ErrorUnauthorized};
use futures::future::{Ready, ready};

/// Caller identity, placed in request extensions by `auth_middleware`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// For admins this is also the tenant id
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(ErrorUnauthorized("Missing token"))),
        }
    }
}

impl AuthUser {
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }

    /// The tenant whose users this caller may see.
    pub fn admin_id(&self) -> i64 {
        self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn admin() -> AuthUser {
        AuthUser {
            user_id: 3,
            username: "admin-3".to_string(),
            role: Role::Admin,
        }
    }

    #[actix_web::test]
    async fn extracts_user_placed_by_middleware() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(admin());

        let user = AuthUser::extract(&req).await.unwrap();
        assert_eq!(user.admin_id(), 3);
        assert!(user.require_admin().is_ok());
    }

    #[actix_web::test]
    async fn missing_identity_is_rejected() {
        let req = TestRequest::default().to_http_request();
        let err = AuthUser::extract(&req).await.unwrap_err();
        assert_eq!(
            err.error_response().status(),
            actix_web::http::StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn plain_users_are_not_admins() {
        let user = AuthUser {
            role: Role::User,
            ..admin()
        };
        assert!(matches!(user.require_admin(), Err(ApiError::Forbidden)));
    }
}
