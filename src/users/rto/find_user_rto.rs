use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::role::Role;
use crate::users::model::user::User;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct FindUserRto {
  pub uuid: String,
  pub email: String,
  #[serde(rename = "userName")]
  pub user_name: String,
  pub role: Role,
}

impl From<User> for FindUserRto {
  fn from(user: User) -> Self {
    Self {
      uuid: user.uuid,
      email: user.email,
      user_name: user.user_name,
      role: user.role,
    }
  }
}
