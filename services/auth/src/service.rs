//! Auth registry service: registration, login and the user listing

use std::sync::Arc;

use tracing::info;

use crate::{
    error::{AuthError, AuthResult, Operation, RepositoryError},
    models::{LoginRequest, NewUser, PublicUser, RegisterRequest},
    password::PasswordHasher,
    repositories::UserRepository,
    validation::{validate_login, validate_registration},
};

/// Registers and authenticates users against a `UserRepository`
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
}

impl AuthService {
    /// Create a new auth service
    pub fn new(users: Arc<dyn UserRepository>, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }

    /// Register a new user and return it without password data
    pub async fn register(&self, payload: &RegisterRequest) -> AuthResult<PublicUser> {
        let registration = validate_registration(payload).map_err(AuthError::MissingFields)?;

        let password_hash = self
            .hasher
            .hash(&registration.password)
            .map_err(|e| AuthError::internal(Operation::Register, e))?;

        let user = self
            .users
            .create(NewUser {
                first_name: registration.first_name,
                last_name: registration.last_name,
                email: registration.email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::DuplicateEmail(_) => AuthError::DuplicateEmail,
                other => AuthError::internal(Operation::Register, other),
            })?;

        info!("New user registered: {}", user.email);
        Ok(PublicUser::from(&user))
    }

    /// Authenticate by email and password
    pub async fn login(&self, payload: &LoginRequest) -> AuthResult<PublicUser> {
        let credentials = validate_login(payload).map_err(AuthError::MissingFields)?;

        let user = self
            .users
            .find_by_email(&credentials.email)
            .await
            .map_err(|e| AuthError::internal(Operation::Login, e))?
            .ok_or(AuthError::InvalidCredentials)?;

        let valid = self
            .hasher
            .verify(&credentials.password, &user.password_hash)
            .map_err(|e| AuthError::internal(Operation::Login, e))?;

        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        info!("User logged in: {}", user.email);
        Ok(PublicUser::from(&user))
    }

    /// All users, password data stripped
    pub async fn list_users(&self) -> AuthResult<Vec<PublicUser>> {
        let users = self
            .users
            .get_all()
            .await
            .map_err(|e| AuthError::internal(Operation::ListUsers, e))?;

        Ok(users.iter().map(PublicUser::from).collect())
    }
}
