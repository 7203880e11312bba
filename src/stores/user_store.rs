use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::errors::auth::AuthError;
use crate::services::crypto;
use crate::types::db::staff::{self, Entity as Staff};
use crate::types::db::user::{self, Entity as User};
use crate::types::dto::auth::RegisterStaffRequest;
use crate::types::internal::auth::Role;

/// UserStore manages user accounts and their attached staff profiles
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Verify login credentials and return the user on success
    ///
    /// A missing user, an inactive user and a wrong password all collapse
    /// into the same `InvalidCredentials` error.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<user::Model, AuthError> {
        let user = User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;

        let user = user
            .filter(|u| u.is_active)
            .ok_or_else(AuthError::invalid_credentials)?;

        if !crypto::verify_password(password, &user.password_hash) {
            return Err(AuthError::invalid_credentials());
        }

        Ok(user)
    }

    /// Find a user by id
    pub async fn find_by_id(&self, user_id: &str) -> Result<Option<user::Model>, AuthError> {
        User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))
    }

    /// Find an active user by id holding the DOCTOR role
    pub async fn find_active_doctor(
        &self,
        doctor_id: &str,
    ) -> Result<Option<user::Model>, AuthError> {
        User::find()
            .filter(user::Column::Id.eq(doctor_id))
            .filter(user::Column::Role.eq(Role::Doctor.as_str()))
            .filter(user::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))
    }

    /// Load the staff profile attached to a user, if any
    pub async fn find_staff_for_user(
        &self,
        user_id: &str,
    ) -> Result<Option<staff::Model>, AuthError> {
        Staff::find()
            .filter(staff::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))
    }

    /// Batch load users with their staff profiles for response assembly
    pub async fn find_by_ids_with_staff(
        &self,
        ids: &[String],
    ) -> Result<Vec<(user::Model, Option<staff::Model>)>, AuthError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = User::find()
            .filter(user::Column::Id.is_in(ids.iter().cloned()))
            .all(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;

        let user_ids: Vec<String> = users.iter().map(|u| u.id.clone()).collect();
        let staff_rows = Staff::find()
            .filter(staff::Column::UserId.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;

        Ok(users
            .into_iter()
            .map(|u| {
                let profile = staff_rows.iter().find(|s| s.user_id == u.id).cloned();
                (u, profile)
            })
            .collect())
    }

    /// Register a staff member together with their login account.
    ///
    /// User and staff rows are written in one transaction so a failure
    /// leaves neither behind.
    pub async fn register_staff(
        &self,
        request: RegisterStaffRequest,
    ) -> Result<(user::Model, staff::Model), AuthError> {
        let existing = User::find()
            .filter(user::Column::Email.eq(&request.email))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;
        if existing.is_some() {
            return Err(AuthError::duplicate_email());
        }

        let password_hash = crypto::hash_password(&request.password)?;
        let staff_number = crypto::generate_staff_number(request.role, &request.department);
        let now = Utc::now();
        let timestamp = now.timestamp();

        let user_id = Uuid::new_v4().to_string();
        let staff_id = Uuid::new_v4().to_string();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;

        let staff_row = staff::ActiveModel {
            id: Set(staff_id.clone()),
            staff_number: Set(staff_number),
            user_id: Set(user_id.clone()),
            first_name: Set(request.first_name),
            last_name: Set(request.last_name),
            middle_name: Set(request.middle_name),
            phone: Set(request.phone),
            email: Set(request.email.clone()),
            department: Set(request.department),
            position: Set(request.position),
            specialization: Set(request.specialization),
            hire_date: Set(now.date_naive().to_string()),
            created_at: Set(timestamp),
        };
        let staff_row = staff_row.insert(&txn).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                AuthError::duplicate_email()
            } else {
                AuthError::internal_error(format!("Database error: {}", e))
            }
        })?;

        let user_row = user::ActiveModel {
            id: Set(user_id),
            email: Set(request.email),
            password_hash: Set(password_hash),
            role: Set(request.role.as_str().to_string()),
            staff_id: Set(Some(staff_id)),
            is_active: Set(true),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        };
        let user_row = user_row.insert(&txn).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                AuthError::duplicate_email()
            } else {
                AuthError::internal_error(format!("Database error: {}", e))
            }
        })?;

        txn.commit()
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;

        Ok((user_row, staff_row))
    }

    /// Create an active ADMIN account if no user holds the email yet.
    /// Used to bootstrap the first login on a fresh database.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<bool, AuthError> {
        let existing = User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;
        if existing.is_some() {
            return Ok(false);
        }

        let password_hash = crypto::hash_password(password)?;
        let timestamp = Utc::now().timestamp();

        let user_row = user::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            role: Set(Role::Admin.as_str().to_string()),
            staff_id: Set(None),
            is_active: Set(true),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        };
        user_row
            .insert(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;

        Ok(true)
    }

    /// Change a user's password after verifying the current one
    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or_else(AuthError::user_not_found)?;

        if !crypto::verify_password(current_password, &user.password_hash) {
            return Err(AuthError::invalid_current_password());
        }

        let password_hash = crypto::hash_password(new_password)?;

        let mut active: user::ActiveModel = user.into();
        active.password_hash = Set(password_hash);
        active.updated_at = Set(Utc::now().timestamp());
        active
            .update(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;

        Ok(())
    }
}
