use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::users::model::user::User;

#[derive(Debug, Error)]
pub enum UserRepositoryError {
  #[error("User not found")]
  NotFound,

  #[error("User already exists")]
  AlreadyExists,

  #[error("User store lock poisoned")]
  Poisoned,

  #[cfg(feature = "mongodb")]
  #[error("MongoDB error: {0}")]
  Mongo(#[from] mongodb::error::Error),
}

pub enum FindOneProperty<'a> {
  Uuid(&'a str),
  Email(&'a str),
}

impl FindOneProperty<'_> {
  fn matches(&self, user: &User) -> bool {
    match self {
      FindOneProperty::Uuid(uuid) => user.uuid == *uuid,
      FindOneProperty::Email(email) => user.email == *email,
    }
  }

  #[cfg(feature = "mongodb")]
  fn to_mongo_key_value(&self) -> mongodb::bson::Document {
    use mongodb::bson::doc;
    match self {
      FindOneProperty::Uuid(uuid) => {
        doc! { "uuid": *uuid }
      }
      FindOneProperty::Email(email) => {
        doc! { "email": *email }
      }
    }
  }
}

/// Storage for user accounts. Implementations must reject a second user
/// with an email that is already stored.
#[allow(async_fn_in_trait)]
pub trait UserRepository {
  async fn find_one(
    &self,
    property: FindOneProperty<'_>,
  ) -> Result<User, UserRepositoryError>;
  async fn find_all(&self) -> Result<Vec<User>, UserRepositoryError>;
  async fn create(&self, user: User) -> Result<(), UserRepositoryError>;
}

// ### In-memory implementation ###

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
  pub users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

impl UserRepository for InMemoryUserRepository {
  async fn find_one(
    &self,
    property: FindOneProperty<'_>,
  ) -> Result<User, UserRepositoryError> {
    let users = self
      .users
      .read()
      .map_err(|_| UserRepositoryError::Poisoned)?;
    users
      .iter()
      .find(|user| property.matches(user))
      .cloned()
      .ok_or(UserRepositoryError::NotFound)
  }

  async fn find_all(&self) -> Result<Vec<User>, UserRepositoryError> {
    let users = self
      .users
      .read()
      .map_err(|_| UserRepositoryError::Poisoned)?;
    Ok(users.clone())
  }

  async fn create(&self, user: User) -> Result<(), UserRepositoryError> {
    // The uniqueness check and the push happen under the same write lock.
    let mut users = self
      .users
      .write()
      .map_err(|_| UserRepositoryError::Poisoned)?;
    if users.iter().any(|existing| existing.email == user.email) {
      return Err(UserRepositoryError::AlreadyExists);
    }
    users.push(user);
    Ok(())
  }
}

// ### MongoDB implementation ###

#[cfg(feature = "mongodb")]
pub use mongo::MongoUserRepository;

#[cfg(feature = "mongodb")]
mod mongo {
  use futures::TryStreamExt;
  use mongodb::{
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
  };

  use super::{FindOneProperty, UserRepository, UserRepositoryError};
  use crate::{shared::database::MongoDatabase, users::model::user::User};

  const DUPLICATE_KEY: i32 = 11000;

  #[derive(Clone)]
  pub struct MongoUserRepository {
    collection: Collection<User>,
  }

  impl MongoUserRepository {
    pub fn new(database: &MongoDatabase) -> Self {
      Self {
        collection: database.users(),
      }
    }

    /// Creates the unique index on `email`. Safe to call on every start.
    pub async fn ensure_indexes(&self) -> Result<(), UserRepositoryError> {
      let index = IndexModel::builder()
        .keys(doc! { "email": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();
      self.collection.create_index(index).await?;
      Ok(())
    }
  }

  impl UserRepository for MongoUserRepository {
    async fn find_one(
      &self,
      property: FindOneProperty<'_>,
    ) -> Result<User, UserRepositoryError> {
      self
        .collection
        .find_one(property.to_mongo_key_value())
        .await?
        .ok_or(UserRepositoryError::NotFound)
    }

    async fn find_all(&self) -> Result<Vec<User>, UserRepositoryError> {
      let cursor = self.collection.find(doc! {}).await?;
      let users: Vec<User> = cursor.try_collect().await?;
      Ok(users)
    }

    async fn create(&self, user: User) -> Result<(), UserRepositoryError> {
      match self.collection.insert_one(&user).await {
        Ok(_) => Ok(()),
        Err(error) if is_duplicate_key(&error) => {
          Err(UserRepositoryError::AlreadyExists)
        }
        Err(error) => Err(error.into()),
      }
    }
  }

  fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
      error.kind.as_ref(),
      ErrorKind::Write(WriteFailure::WriteError(write_error))
        if write_error.code == DUPLICATE_KEY
    )
  }
}
