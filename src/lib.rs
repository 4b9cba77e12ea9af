pub mod auth;
pub mod dashboard;
pub mod seed;
pub mod shared;
pub mod users;

use std::sync::Arc;

use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;
use auth::{access_token, auth_login, login_page};
use dashboard::{describe_shell, render_dashboard};
use shared::{
  config::Config, handlers::check_health, hash_worker::Hasher,
  middleware::bearer_middleware::bearer_validator,
};
use users::{
  create_user, find_users, repository::user_repository::UserRepository,
};
use utoipa::{
  openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
  Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

// This struct represents state
pub struct AppState<UR: UserRepository> {
  pub user_repository: UR,
  pub config: Config,
  pub hasher: Arc<dyn Hasher>,
}

#[derive(OpenApi)]
#[openapi(
  paths(
    shared::handlers::check_health,
    auth::auth_login,
    auth::access_token,
    users::create_user,
    users::find_users,
  ),
  components(schemas(
    auth::dto::login_dto::LoginDto,
    auth::rto::login_rto::LoginRto,
    users::dto::create_user_dto::CreateUserDto,
    users::rto::find_user_rto::FindUserRto,
    shared::rto::created_rto::CreatedRto,
    shared::http_error::HttpError,
    shared::role::Role,
  )),
  modifiers(&BearerSecurity)
)]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
  fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
    if let Some(components) = openapi.components.as_mut() {
      components.add_security_scheme(
        "bearer",
        SecurityScheme::Http(
          HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .build(),
        ),
      );
    }
  }
}

/// Registers every route of the service. Called once per worker.
pub fn configure<UR: UserRepository + 'static>(
  config: &mut web::ServiceConfig,
  state: web::Data<AppState<UR>>,
) {
  // Rate limit
  // Allow bursts with up to five requests per IP address
  // and replenishes two elements per second
  let governor_config = GovernorConfigBuilder::default()
    .requests_per_second(2)
    .burst_size(5)
    .finish()
    .expect("rate limit period and burst size are non-zero");

  config
    .app_data(state)
    .route("/health", web::get().to(check_health))
    .route("/login", web::get().to(login_page))
    .service(
      SwaggerUi::new("/docs/{_:.*}")
        .url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .service(
      web::scope("/v1")
        .service(
          web::scope("/auth")
            .wrap(Governor::new(&governor_config))
            .route("/login", web::post().to(auth_login::<UR>))
            .route("/token", web::post().to(access_token::<UR>)),
        )
        .service(
          web::scope("/users")
            .wrap(HttpAuthentication::with_fn(bearer_validator::<UR>))
            .route("", web::post().to(create_user::<UR>))
            .route("", web::get().to(find_users::<UR>)),
        )
        .service(
          web::scope("/dashboard")
            .wrap(HttpAuthentication::with_fn(bearer_validator::<UR>))
            .route("/shell", web::get().to(describe_shell)),
        ),
    )
    .service(
      web::scope("/dashboard")
        .wrap(HttpAuthentication::with_fn(bearer_validator::<UR>))
        .route("", web::get().to(render_dashboard))
        .route("/{tail:.*}", web::get().to(render_dashboard)),
    );
}
