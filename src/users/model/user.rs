use chrono::{DateTime, Utc};
use nanoid::nanoid;
use serde::{Deserialize, Serialize};

use crate::shared::role::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub uuid: String,
  pub email: String,
  pub user_name: String,
  pub password_hash: String,
  pub role: Role,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl User {
  pub fn new(
    email: String,
    user_name: String,
    password_hash: String,
    role: Role,
  ) -> Self {
    let now = Utc::now();
    Self {
      uuid: nanoid!(),
      email,
      user_name,
      password_hash,
      role,
      created_at: now,
      updated_at: now,
    }
  }
}
