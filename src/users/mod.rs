pub mod dto;
pub mod model;
pub mod repository;
pub mod rto;

use actix_web::http::header;
use actix_web::{web, HttpResponse, Responder};
use dto::create_user_dto::CreateUserDto;
use model::user::User;
use repository::user_repository::{
  FindOneProperty, UserRepository, UserRepositoryError,
};
use rto::find_user_rto::FindUserRto;
use validator::Validate;

use crate::auth::token::AccessTokenClaims;
use crate::shared::hash_worker::Hasher;
use crate::shared::http_error::HttpError;
use crate::shared::role::Role;
use crate::shared::rto::created_rto::CreatedRto;
use crate::AppState;

#[utoipa::path(
  post,
  path = "/v1/users",
  request_body = CreateUserDto,
  responses(
    (status = 201, description = "User created", body = CreatedRto),
    (status = 400, description = "Invalid payload"),
    (status = 403, description = "Caller is not an administrator", body = HttpError),
    (status = 409, description = "Email already registered", body = HttpError)
  ),
  security(("bearer" = []))
)]
pub async fn create_user<UR: UserRepository>(
  data: web::Data<AppState<UR>>,
  claims: web::ReqData<AccessTokenClaims>,
  dto: web::Json<CreateUserDto>,
) -> impl Responder {
  if claims.role != Role::Admin {
    return forbidden();
  }

  if let Err(validation_errors) = dto.validate() {
    return HttpResponse::BadRequest().json(validation_errors);
  }

  if data
    .user_repository
    .find_one(FindOneProperty::Email(&dto.email))
    .await
    .is_ok()
  {
    return user_already_exists();
  }

  let password_hash = match data.hasher.hash_password(&dto.password).await {
    Ok(password_hash) => password_hash,
    Err(error) => {
      tracing::error!(%error, "failed to hash password");
      return internal_server_error();
    }
  };
  let user = User::from(dto.into_inner(), password_hash);

  match data.user_repository.create(user.clone()).await {
    Ok(()) => {
      tracing::info!(uuid = %user.uuid, role = ?user.role, "user created");
      HttpResponse::Created()
        .content_type("application/json")
        .append_header((header::LOCATION, format!("/v1/users/{}", &user.uuid)))
        .json(CreatedRto::from(user))
    }
    Err(UserRepositoryError::AlreadyExists) => user_already_exists(),
    Err(error) => {
      tracing::error!(%error, "failed to store user");
      internal_server_error()
    }
  }
}

#[utoipa::path(
  get,
  path = "/v1/users",
  responses(
    (status = 200, description = "Every registered user", body = Vec<FindUserRto>),
    (status = 403, description = "Caller is not an administrator", body = HttpError)
  ),
  security(("bearer" = []))
)]
pub async fn find_users<UR: UserRepository>(
  data: web::Data<AppState<UR>>,
  claims: web::ReqData<AccessTokenClaims>,
) -> impl Responder {
  if claims.role != Role::Admin {
    return forbidden();
  }

  match data.user_repository.find_all().await {
    Ok(users) => HttpResponse::Ok().json(
      users
        .into_iter()
        .map(FindUserRto::from)
        .collect::<Vec<_>>(),
    ),
    Err(error) => {
      tracing::error!(%error, "failed to list users");
      internal_server_error()
    }
  }
}

fn user_already_exists() -> HttpResponse {
  HttpResponse::Conflict()
    .content_type("application/json")
    .json(HttpError::from("User already exists"))
}

fn forbidden() -> HttpResponse {
  HttpResponse::Forbidden()
    .content_type("application/json")
    .json(HttpError::from("Forbidden"))
}

fn internal_server_error() -> HttpResponse {
  HttpResponse::InternalServerError().finish()
}

impl User {
  fn from(dto: CreateUserDto, password_hash: String) -> Self {
    User::new(dto.email, dto.user_name, password_hash, dto.role)
  }
}

impl From<User> for CreatedRto {
  fn from(user: User) -> Self {
    Self { uuid: user.uuid }
  }
}
