use std::future::{ready, Ready};

use actix_web::{dev::ServiceRequest, web, FromRequest, HttpMessage, HttpRequest};
use actix_web_httpauth::extractors::bearer::BearerAuth;

use crate::{
    auth::{Claims, JwtService},
    errors::AppError,
};

/// Bearer validator for `HttpAuthentication::bearer`; stores the token's claims on the request.
pub async fn bearer_validator(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    let claims = match req.app_data::<web::Data<JwtService>>() {
        Some(jwt_service) => jwt_service.validate_token(credentials.token()),
        None => Err(AppError::InternalError(
            "JWT service not configured".to_string(),
        )),
    };

    match claims {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            Ok(req)
        }
        Err(err) => {
            log::debug!("Rejected bearer token: {}", err);
            Err((err.into(), req))
        }
    }
}

// Extractor for the authenticated caller in handlers
pub struct AuthenticatedUser(pub Claims);

impl AuthenticatedUser {
    pub fn user_id(&self) -> &str {
        &self.0.sub
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let claims = req
            .extensions()
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()));

        ready(claims.map(AuthenticatedUser))
    }
}
