use serde::Deserialize;
use utoipa::ToSchema;
use validator_derive::Validate;

use crate::shared::role::Role;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
  #[validate(email(message = "Email must be a valid address"))]
  pub email: String,
  #[validate(length(
    min = 1,
    message = "UserName must have at least 1 characters"
  ))]
  #[serde(rename = "userName")]
  pub user_name: String,
  #[validate(length(
    min = 8,
    message = "Password must have at least 8 characters"
  ))]
  pub password: String,
  pub role: Role,
}
