use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub enum Role {
  #[serde(rename = "admin")]
  Admin,
  #[serde(rename = "employee")]
  Employee,
}

impl Role {
  pub fn label(&self) -> &'static str {
    match self {
      Role::Admin => "Administrator",
      Role::Employee => "Employee",
    }
  }
}
