use crate::auth::admin_jwt::verify_admin_jwt;
use crate::auth::config::AdminAuthConfig;
use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{error::ErrorUnauthorized, web, Error, FromRequest, HttpRequest};
use futures::future::{ready, Ready};

/// A request carrying a valid admin bearer token.
pub struct AdminPrincipal {
    pub username: String,
}

impl FromRequest for AdminPrincipal {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let Some(cfg) = req.app_data::<web::Data<AdminAuthConfig>>() else {
            error!("AdminPrincipal: admin auth config not registered");
            return ready(Err(ErrorUnauthorized("admin auth unavailable")));
        };
        let token = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim);
        let Some(token) = token else {
            return ready(Err(ErrorUnauthorized("missing bearer token")));
        };
        match verify_admin_jwt(token, &cfg.jwt) {
            Ok(username) => ready(Ok(AdminPrincipal { username })),
            Err(e) => {
                debug!("AdminPrincipal: rejected token: {}", e);
                ready(Err(ErrorUnauthorized("invalid admin token")))
            }
        }
    }
}
