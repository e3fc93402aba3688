use crate::auth::admin_jwt::issue_admin_jwt;
use crate::auth::password::verify_password;
use crate::auth::AdminAuthConfig;
use crate::enums::admin::{LoginRequest, LoginResponse};
use actix_web::{post, web, HttpResponse, Responder};

#[utoipa::path(
    post,
    tag = "Admin",
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Wrong credentials", body = LoginResponse)
    ),
    summary = "Exchange the admin password for a bearer token"
)]
#[post("/login")]
pub(super) async fn admin_login(
    auth: web::Data<AdminAuthConfig>,
    req_data: web::Json<LoginRequest>,
) -> impl Responder {
    let LoginRequest { username, password } = req_data.into_inner();
    let valid = match verify_password(&password, &auth.password_hash) {
        Ok(matches) => matches && username == auth.username,
        Err(e) => {
            error!("ADMIN: admin_login(): stored password hash unusable: {}", e);
            return HttpResponse::InternalServerError().json(LoginResponse {
                status: "error".to_string(),
                token: None,
                error: Some("Login unavailable".to_string()),
            });
        }
    };
    if !valid {
        warn!("ADMIN: admin_login(): rejected login for '{}'", username);
        return HttpResponse::Unauthorized().json(LoginResponse {
            status: "error".to_string(),
            token: None,
            error: Some("Invalid credentials".to_string()),
        });
    }

    match issue_admin_jwt(&username, &auth.jwt) {
        Ok(token) => {
            info!("ADMIN: admin_login(): '{}' logged in", username);
            HttpResponse::Ok().json(LoginResponse {
                status: "ok".to_string(),
                token: Some(token),
                error: None,
            })
        }
        Err(e) => {
            error!("ADMIN: admin_login(): {}", e);
            HttpResponse::InternalServerError().json(LoginResponse {
                status: "error".to_string(),
                token: None,
                error: Some("Login unavailable".to_string()),
            })
        }
    }
}
