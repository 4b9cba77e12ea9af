use std::env;

use thiserror::Error;

use crate::shared::hash_worker::{HashWorkerError, Hasher};
use crate::shared::role::Role;
use crate::users::model::user::User;
use crate::users::repository::user_repository::{
  FindOneProperty, UserRepository, UserRepositoryError,
};

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@rentdesk.local";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_ADMIN_NAME: &str = "Administrator";

#[derive(Debug, Error)]
pub enum SeedError {
  #[error("Hashing error: {0}")]
  Hash(#[from] HashWorkerError),
  #[error("Repository error: {0}")]
  Repository(#[from] UserRepositoryError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedCredentials {
  pub email: String,
  pub password: String,
  pub user_name: String,
}

impl Default for SeedCredentials {
  fn default() -> Self {
    Self {
      email: DEFAULT_ADMIN_EMAIL.to_string(),
      password: DEFAULT_ADMIN_PASSWORD.to_string(),
      user_name: DEFAULT_ADMIN_NAME.to_string(),
    }
  }
}

impl SeedCredentials {
  /// Built-in credentials, overridden by `SEED_ADMIN_EMAIL`,
  /// `SEED_ADMIN_PASSWORD` and `SEED_ADMIN_NAME` when set.
  pub fn from_env() -> Self {
    let defaults = Self::default();
    Self {
      email: env::var("SEED_ADMIN_EMAIL").unwrap_or(defaults.email),
      password: env::var("SEED_ADMIN_PASSWORD").unwrap_or(defaults.password),
      user_name: env::var("SEED_ADMIN_NAME").unwrap_or(defaults.user_name),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
  Created { uuid: String },
  AlreadyExists { uuid: Option<String> },
}

/// Creates the administrator account unless one with the same email is
/// already stored. Running it any number of times leaves exactly one record.
pub async fn seed_admin<UR: UserRepository>(
  repository: &UR,
  hasher: &dyn Hasher,
  credentials: &SeedCredentials,
) -> Result<SeedOutcome, SeedError> {
  let password_hash = hasher.hash_password(&credentials.password).await?;

  match repository
    .find_one(FindOneProperty::Email(&credentials.email))
    .await
  {
    Ok(existing) => {
      tracing::info!(email = %credentials.email, "admin user already exists");
      return Ok(SeedOutcome::AlreadyExists {
        uuid: Some(existing.uuid),
      });
    }
    Err(UserRepositoryError::NotFound) => {}
    Err(error) => return Err(error.into()),
  }

  let user = User::new(
    credentials.email.clone(),
    credentials.user_name.clone(),
    password_hash,
    Role::Admin,
  );
  let uuid = user.uuid.clone();

  match repository.create(user).await {
    Ok(()) => {
      tracing::info!(email = %credentials.email, %uuid, "admin user created");
      Ok(SeedOutcome::Created { uuid })
    }
    // Another run inserted the same email between our lookup and insert.
    Err(UserRepositoryError::AlreadyExists) => {
      tracing::warn!(
        email = %credentials.email,
        "admin user created concurrently"
      );
      Ok(SeedOutcome::AlreadyExists { uuid: None })
    }
    Err(error) => Err(error.into()),
  }
}
