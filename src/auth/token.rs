use chrono::Utc;
use jsonwebtoken::{
  decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::rto::login_rto::LoginRto;
use crate::shared::role::Role;
use crate::users::model::user::User;

pub const ACCESS_TOKEN_EXPIRY: u64 = 15 * 60; // 15 minutes in seconds
pub const REFRESH_TOKEN_EXPIRY: u64 = 7 * 24 * 60 * 60; // 7 days in seconds

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenType {
  #[serde(rename = "access")]
  Access,
  #[serde(rename = "refresh")]
  Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
  pub uuid: String,
  pub role: Role,
  pub sub: String,
  pub typ: TokenType,
  pub iat: u64,
  pub exp: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
  pub uuid: String,
  pub typ: TokenType,
  pub iat: u64,
  pub exp: u64,
}

trait Typed {
  fn token_type(&self) -> TokenType;
}

impl Typed for AccessTokenClaims {
  fn token_type(&self) -> TokenType {
    self.typ
  }
}

impl Typed for RefreshTokenClaims {
  fn token_type(&self) -> TokenType {
    self.typ
  }
}

fn generate_jwt<T: Serialize>(
  secret: &str,
  claims: &T,
) -> Result<String, jsonwebtoken::errors::Error> {
  encode(
    &Header::new(Algorithm::HS256),
    claims,
    &EncodingKey::from_secret(secret.as_bytes()),
  )
}

fn decode_typed<T: DeserializeOwned + Typed>(
  secret: &str,
  token: &str,
  expected: TokenType,
) -> Option<T> {
  let claims = decode::<T>(
    token,
    &DecodingKey::from_secret(secret.as_bytes()),
    &Validation::new(Algorithm::HS256),
  )
  .ok()?
  .claims;
  (claims.token_type() == expected).then_some(claims)
}

/// Issues an access/refresh token pair for `user`.
pub fn issue_token_pair(
  secret: &str,
  user: &User,
) -> Result<LoginRto, jsonwebtoken::errors::Error> {
  let now = Utc::now().timestamp() as u64;

  let access_token = generate_jwt(
    secret,
    &AccessTokenClaims {
      uuid: user.uuid.clone(),
      role: user.role,
      sub: user.user_name.clone(),
      typ: TokenType::Access,
      iat: now,
      exp: now + ACCESS_TOKEN_EXPIRY,
    },
  )?;
  let refresh_token = generate_jwt(
    secret,
    &RefreshTokenClaims {
      uuid: user.uuid.clone(),
      typ: TokenType::Refresh,
      iat: now,
      exp: now + REFRESH_TOKEN_EXPIRY,
    },
  )?;

  Ok(LoginRto {
    access_token,
    refresh_token,
  })
}

pub fn decode_access_token(
  secret: &str,
  token: &str,
) -> Option<AccessTokenClaims> {
  decode_typed(secret, token, TokenType::Access)
}

pub fn decode_refresh_token(
  secret: &str,
  token: &str,
) -> Option<RefreshTokenClaims> {
  decode_typed(secret, token, TokenType::Refresh)
}
