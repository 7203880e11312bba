use poem_openapi::{payload::Json, ApiResponse, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{authenticate, require_role, BearerAuth};
use crate::errors::auth::AuthError;
use crate::services::TokenService;
use crate::stores::UserStore;
use crate::types::db::{staff, user};
use crate::types::dto::auth::{
    ChangePasswordRequest, LoginRequest, LoginResponse, ProfileResponse, RegisterStaffRequest,
    StaffProfile, StaffRegisteredResponse, UserSummary,
};
use crate::types::dto::common::MessageResponse;
use crate::types::internal::auth::Role;

/// Authentication API endpoints
pub struct AuthApi {
    user_store: Arc<UserStore>,
    token_service: Arc<TokenService>,
}

impl AuthApi {
    /// Create a new AuthApi with the given UserStore and TokenService
    pub fn new(user_store: Arc<UserStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            user_store,
            token_service,
        }
    }

    fn user_summary(user: user::Model, staff: Option<staff::Model>) -> Result<UserSummary, AuthError> {
        let role = Role::parse(&user.role)
            .ok_or_else(|| AuthError::internal_error(format!("Unknown role: {}", user.role)))?;
        Ok(UserSummary {
            id: user.id,
            email: user.email,
            role,
            staff_id: user.staff_id,
            is_active: user.is_active,
            staff: staff.map(StaffProfile::from),
        })
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

/// API response for staff registration
#[derive(ApiResponse)]
enum RegisterStaffApiResponse {
    /// Staff member registered
    #[oai(status = 201)]
    Created(Json<StaffRegisteredResponse>),
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Login with email and password to receive a bearer token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<LoginResponse>, AuthError> {
        let user = self
            .user_store
            .verify_credentials(&body.email, &body.password)
            .await?;

        let token = self.token_service.generate_jwt(&user)?;
        let staff = self.user_store.find_staff_for_user(&user.id).await?;

        Ok(Json(LoginResponse {
            token,
            user: Self::user_summary(user, staff)?,
        }))
    }

    /// Register a staff member with a login account (admin only)
    #[oai(
        path = "/register-staff",
        method = "post",
        tag = "AuthTags::Authentication"
    )]
    async fn register_staff(
        &self,
        auth: BearerAuth,
        body: Json<RegisterStaffRequest>,
    ) -> Result<RegisterStaffApiResponse, AuthError> {
        let claims = authenticate(&self.token_service, &auth)?;
        require_role(&claims, &[Role::Admin])?;

        let (user, staff) = self.user_store.register_staff(body.0).await?;

        Ok(RegisterStaffApiResponse::Created(Json(
            StaffRegisteredResponse {
                message: "Staff registered successfully".to_string(),
                user: Self::user_summary(user, Some(staff))?,
            },
        )))
    }

    /// Return the authenticated user's profile
    #[oai(path = "/profile", method = "get", tag = "AuthTags::Authentication")]
    async fn profile(&self, auth: BearerAuth) -> Result<Json<ProfileResponse>, AuthError> {
        let claims = authenticate(&self.token_service, &auth)?;

        let user = self
            .user_store
            .find_by_id(&claims.sub)
            .await?
            .ok_or_else(AuthError::user_not_found)?;
        let staff = self.user_store.find_staff_for_user(&user.id).await?;

        Ok(Json(ProfileResponse {
            user: Self::user_summary(user, staff)?,
        }))
    }

    /// Change the authenticated user's password
    #[oai(
        path = "/change-password",
        method = "post",
        tag = "AuthTags::Authentication"
    )]
    async fn change_password(
        &self,
        auth: BearerAuth,
        body: Json<ChangePasswordRequest>,
    ) -> Result<Json<MessageResponse>, AuthError> {
        let claims = authenticate(&self.token_service, &auth)?;

        self.user_store
            .change_password(&claims.sub, &body.current_password, &body.new_password)
            .await?;

        Ok(Json(MessageResponse {
            message: "Password changed successfully".to_string(),
        }))
    }
}
