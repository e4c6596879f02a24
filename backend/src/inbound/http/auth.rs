//! Registration, login and logout handlers.
//!
//! ```text
//! GET  /auth/register  blank registration form payload (public)
//! POST /auth/register  create an account and sign the caller in
//! GET  /login_page     blank login form payload (public)
//! POST /login_page     verify credentials and sign the caller in
//! GET  /logout         drop the session, redirect to /login_page
//! GET  /403            access-denied payload (public)
//! GET  /about_us       static informational payload
//! ```
//!
//! Both registration and login replace any existing session state before
//! persisting the fresh identity, so a pre-authentication cookie never
//! survives into an authenticated session.

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, Registration};
use crate::inbound::http::error::LOGIN_PAGE;
use crate::inbound::http::see_other;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Form payload for creating an account.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RegistrationForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
    /// Comma-separated role names, e.g. `"ROLE_USER,ROLE_ADMIN"`.
    #[serde(default)]
    pub roles: String,
}

/// Form payload for signing in.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
}

/// Static page payload carrying a title and body text.
#[derive(Debug, Serialize, ToSchema)]
pub struct PageView {
    pub title: &'static str,
    pub body: &'static str,
}

/// Blank registration form payload. Drops any session state the caller
/// arrived with.
#[utoipa::path(
    get,
    path = "/auth/register",
    responses((status = 200, description = "Blank registration form", body = RegistrationForm)),
    tags = ["auth"],
    operation_id = "registerForm"
)]
#[get("/auth/register")]
pub async fn register_form(session: SessionContext) -> web::Json<RegistrationForm> {
    session.purge();
    web::Json(RegistrationForm::default())
}

/// Create an account and establish a session for it.
#[utoipa::path(
    post,
    path = "/auth/register",
    responses(
        (status = 303, description = "Registered and signed in; redirect to /"),
        (status = 400, description = "Blank name or password", body = Error),
        (status = 409, description = "Name already registered", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register"
)]
#[post("/auth/register")]
pub async fn register(
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<RegistrationForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let registration = Registration::try_from_parts(&form.name, &form.password, &form.roles)
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    session.reset();
    let identity = state.registration.register(&registration).await?;
    session.persist_identity(&identity)?;
    Ok(see_other("/"))
}

/// Blank login form payload.
#[utoipa::path(
    get,
    path = "/login_page",
    responses((status = 200, description = "Blank login form", body = LoginForm)),
    tags = ["auth"],
    operation_id = "loginForm"
)]
#[get("/login_page")]
pub async fn login_form() -> web::Json<LoginForm> {
    web::Json(LoginForm::default())
}

/// Verify credentials and establish a session.
///
/// The persisted identity comes from the stored account record, not the
/// submitted form, so a caller cannot smuggle roles in with the login.
#[utoipa::path(
    post,
    path = "/login_page",
    responses(
        (status = 303, description = "Signed in; redirect to /"),
        (status = 400, description = "Blank name or password", body = Error),
        (status = 303, description = "Unknown name or wrong password; redirect to login")
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/login_page")]
pub async fn login(
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let credentials = LoginCredentials::try_from_parts(&form.name, &form.password)
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    let identity = state.login.authenticate(&credentials).await?;
    session.reset();
    session.persist_identity(&identity)?;
    Ok(see_other("/"))
}

/// Drop the session and return to the login page.
#[utoipa::path(
    get,
    path = "/logout",
    responses((status = 303, description = "Signed out; redirect to /login_page")),
    tags = ["auth"],
    operation_id = "logout"
)]
#[get("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    see_other(LOGIN_PAGE)
}

/// Access-denied page payload. Public so the redirect target always loads.
#[utoipa::path(
    get,
    path = "/403",
    responses((status = 200, description = "Access denied page", body = PageView)),
    tags = ["auth"],
    operation_id = "accessDenied"
)]
#[get("/403")]
pub async fn access_denied() -> web::Json<PageView> {
    web::Json(PageView {
        title: "Access denied",
        body: "You do not have permission to view this page.",
    })
}

/// Static about-us payload.
#[utoipa::path(
    get,
    path = "/about_us",
    responses(
        (status = 200, description = "About page", body = PageView),
        (status = 303, description = "Anonymous caller redirected to login")
    ),
    tags = ["auth"],
    operation_id = "aboutUs"
)]
#[get("/about_us")]
pub async fn about_us(session: SessionContext) -> ApiResult<web::Json<PageView>> {
    session.require_identity()?;
    Ok(web::Json(PageView {
        title: "About us",
        body: "A small barbershop keeping track of its clients and reviews.",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{register_account, session_cookie, test_app, test_state};
    use actix_web::http::{header, StatusCode};
    use actix_web::test as actix_test;
    use serde_json::Value;

    #[actix_web::test]
    async fn register_then_login_round_trips() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let res = register_account(&app, "walter", "hunter2", "ROLE_USER").await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/")
        );

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/login_page")
                .set_form(LoginForm {
                    name: "walter".into(),
                    password: "hunter2".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        let cookie = session_cookie(&res).expect("session established");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/about_us")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn wrong_password_is_rejected_without_a_session() {
        let app = actix_test::init_service(test_app(test_state())).await;
        register_account(&app, "walter", "hunter2", "ROLE_USER").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/login_page")
                .set_form(LoginForm {
                    name: "walter".into(),
                    password: "wrong".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some(LOGIN_PAGE)
        );
        assert!(session_cookie(&res).is_none());
    }

    #[actix_web::test]
    async fn unknown_name_is_rejected_like_wrong_password() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/login_page")
                .set_form(LoginForm {
                    name: "nobody".into(),
                    password: "whatever".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some(LOGIN_PAGE)
        );
    }

    #[actix_web::test]
    async fn blank_registration_name_is_invalid() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/auth/register")
                .set_form(RegistrationForm {
                    name: "  ".into(),
                    password: "hunter2".into(),
                    roles: "ROLE_USER".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn duplicate_registration_conflicts() {
        let app = actix_test::init_service(test_app(test_state())).await;
        register_account(&app, "walter", "hunter2", "ROLE_USER").await;
        let res = register_account(&app, "walter", "other", "ROLE_USER").await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn admin_registration_grants_admin_pages() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let res = register_account(&app, "boss", "hunter2", "ROLE_USER,ROLE_ADMIN").await;
        let cookie = session_cookie(&res).expect("session established");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/new")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn logout_drops_the_session() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let res = register_account(&app, "walter", "hunter2", "ROLE_USER").await;
        let cookie = session_cookie(&res).expect("session established");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/logout")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        // The logout response rewrites the cookie; the old one no longer
        // carries an identity.
        let cleared = session_cookie(&res);

        let mut req = actix_test::TestRequest::get().uri("/about_us");
        if let Some(cleared) = cleared {
            req = req.cookie(cleared);
        }
        let res = actix_test::call_service(&app, req.to_request()).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }

    #[actix_web::test]
    async fn access_denied_page_is_public() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/403").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            value.get("title").and_then(Value::as_str),
            Some("Access denied")
        );
    }
}
