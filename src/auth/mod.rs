use actix_web::http::header;
use actix_web::{web, HttpResponse, Responder};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use askama::Template;
use dto::login_dto::LoginDto;
use rto::login_rto::LoginRto;
use serde::Deserialize;
use validator::Validate;

use crate::shared::hash_worker::Hasher;
use crate::shared::http_error::HttpError;
use crate::users::model::user::User;
use crate::users::repository::user_repository::{
  FindOneProperty, UserRepository,
};
use crate::AppState;

pub mod dto;
pub mod rto;
pub mod token;

pub const LOGIN_ENDPOINT: &str = "/v1/auth/login";

#[derive(Debug, Default, Deserialize)]
pub struct LoginPageQuery {
  pub logout: Option<String>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
  pub signed_out: bool,
  pub login_endpoint: &'static str,
}

/// Sign-in page, also the target of the dashboards' Logout links. On
/// `?logout=1` the browser is told to drop the tokens it stored.
pub async fn login_page(query: web::Query<LoginPageQuery>) -> impl Responder {
  let page = LoginPage {
    signed_out: query.logout.as_deref() == Some("1"),
    login_endpoint: LOGIN_ENDPOINT,
  };

  let html = match page.render() {
    Ok(html) => html,
    Err(error) => {
      tracing::error!(%error, "failed to render login page");
      return HttpResponse::InternalServerError().finish();
    }
  };

  let mut response = HttpResponse::Ok();
  response
    .content_type("text/html; charset=utf-8")
    .insert_header((header::CACHE_CONTROL, "no-store"));
  if page.signed_out {
    response.insert_header(("Clear-Site-Data", r#""storage""#));
  }
  response.body(html)
}

#[utoipa::path(
  post,
  path = "/v1/auth/login",
  request_body = LoginDto,
  responses(
    (status = 200, description = "Credentials accepted", body = LoginRto),
    (status = 400, description = "Malformed credentials"),
    (status = 401, description = "Unknown email or wrong password", body = HttpError)
  )
)]
pub async fn auth_login<UR: UserRepository>(
  data: web::Data<AppState<UR>>,
  dto: web::Json<LoginDto>,
) -> impl Responder {
  if let Err(validation_errors) = dto.validate() {
    return HttpResponse::BadRequest().json(validation_errors);
  }

  // TODO: an unknown email returns before any bcrypt work, so response time
  // leaks whether the account exists. Verify against a dummy hash instead.
  let user = match data
    .user_repository
    .find_one(FindOneProperty::Email(&dto.email))
    .await
  {
    Ok(user) => user,
    Err(error) => {
      tracing::debug!(%error, "login rejected");
      return unauthorized();
    }
  };

  match data
    .hasher
    .verify_password(&dto.password, &user.password_hash)
    .await
  {
    Ok(true) => generate_token_response(&data, &user),
    Ok(false) => {
      tracing::info!(uuid = %user.uuid, "login rejected: wrong password");
      unauthorized()
    }
    Err(error) => {
      tracing::error!(%error, "password verification failed");
      HttpResponse::InternalServerError().finish()
    }
  }
}

#[utoipa::path(
  post,
  path = "/v1/auth/token",
  responses(
    (status = 200, description = "Fresh token pair", body = LoginRto),
    (status = 401, description = "Missing or invalid refresh token", body = HttpError)
  ),
  security(("bearer" = []))
)]
pub async fn access_token<UR: UserRepository>(
  data: web::Data<AppState<UR>>,
  credentials: BearerAuth,
) -> impl Responder {
  let Some(claims) =
    token::decode_refresh_token(&data.config.jwt_secret, credentials.token())
  else {
    return unauthorized();
  };

  match data
    .user_repository
    .find_one(FindOneProperty::Uuid(&claims.uuid))
    .await
  {
    Ok(user) => generate_token_response(&data, &user),
    Err(_) => unauthorized(),
  }
}

fn generate_token_response<UR: UserRepository>(
  data: &web::Data<AppState<UR>>,
  user: &User,
) -> HttpResponse {
  match token::issue_token_pair(&data.config.jwt_secret, user) {
    Ok(tokens) => HttpResponse::Ok()
      .content_type("application/json")
      .json(tokens),
    Err(error) => {
      tracing::error!(%error, "failed to sign tokens");
      HttpResponse::InternalServerError().finish()
    }
  }
}

fn unauthorized() -> HttpResponse {
  HttpResponse::Unauthorized()
    .content_type("application/json")
    .json(HttpError::from("Unauthorized"))
}
