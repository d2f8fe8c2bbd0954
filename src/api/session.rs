//! Session endpoints: mocked login, logout and language preference.

use actix_web::{HttpResponse, get, post, put, web};

use crate::error::AppResult;
use crate::models::{LoginRequest, RegisterRequest, SessionResponse, SetLanguageRequest, User};
use crate::services::SessionStore;

/// Configure session routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_session)
        .service(login)
        .service(register)
        .service(logout)
        .service(set_language);
}

/// Current session flags.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    tag = "Session",
    responses(
        (status = 200, description = "Session flags", body = SessionResponse)
    )
)]
#[get("/session")]
pub async fn get_session(session: web::Data<SessionStore>) -> HttpResponse {
    HttpResponse::Ok().json(session.session().await)
}

/// Sign in. Any well-formed email and non-empty password are accepted.
#[utoipa::path(
    post,
    path = "/api/v1/session/login",
    tag = "Session",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = User),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
#[post("/session/login")]
pub async fn login(
    session: web::Data<SessionStore>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let user = session.login(&body).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Create an account and sign in.
#[utoipa::path(
    post,
    path = "/api/v1/session/register",
    tag = "Session",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registered and signed in", body = User),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
#[post("/session/register")]
pub async fn register(
    session: web::Data<SessionStore>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let user = session.register(&body).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Sign out.
#[utoipa::path(
    post,
    path = "/api/v1/session/logout",
    tag = "Session",
    responses(
        (status = 204, description = "Signed out")
    )
)]
#[post("/session/logout")]
pub async fn logout(session: web::Data<SessionStore>) -> AppResult<HttpResponse> {
    session.logout().await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Persist the interface language.
#[utoipa::path(
    put,
    path = "/api/v1/session/language",
    tag = "Session",
    request_body = SetLanguageRequest,
    responses(
        (status = 200, description = "Updated session flags", body = SessionResponse),
        (status = 400, description = "Unsupported language", body = crate::error::ErrorResponse)
    )
)]
#[put("/session/language")]
pub async fn set_language(
    session: web::Data<SessionStore>,
    body: web::Json<SetLanguageRequest>,
) -> AppResult<HttpResponse> {
    session.set_language(body.language).await?;
    Ok(HttpResponse::Ok().json(session.session().await))
}
