use actix_web::{dev::ServiceRequest, error, web, Error, HttpMessage};
use actix_web_httpauth::extractors::bearer::BearerAuth;

use crate::auth::token::decode_access_token;
use crate::users::repository::user_repository::UserRepository;
use crate::AppState;

/// Accepts requests carrying a valid access token and stores its claims in
/// the request extensions for `web::ReqData<AccessTokenClaims>`.
pub async fn bearer_validator<UR: UserRepository + 'static>(
  req: ServiceRequest,
  credentials: BearerAuth,
) -> Result<ServiceRequest, (Error, ServiceRequest)> {
  let Some(data) = req.app_data::<web::Data<AppState<UR>>>() else {
    tracing::error!("application state is not registered");
    return Err((error::ErrorInternalServerError("misconfigured"), req));
  };

  let claims =
    decode_access_token(&data.config.jwt_secret, credentials.token());
  match claims {
    Some(claims) => {
      req.extensions_mut().insert(claims);
      Ok(req)
    }
    None => Err((error::ErrorUnauthorized("Unauthorized"), req)),
  }
}
