use actix_web::{HttpResponse, Responder};

#[utoipa::path(
  get,
  path = "/health",
  responses(
    (status = 200, description = "Check the service health")
  )
)]
pub async fn check_health() -> impl Responder {
  HttpResponse::Ok().finish()
}
