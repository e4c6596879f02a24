//! Backend entry-point: wires the page endpoints, session middleware, and
//! PostgreSQL persistence.

use std::env;
use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use actix_web::{web, App, HttpServer};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::domain::ports::AccountRepository;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{auth, clients, posts};
use backend::outbound::auth::PasswordAccountService;
use backend::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselClientRepository, DieselPostRepository,
};
#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::Trace;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    let key = match std::fs::read(&key_path) {
        Ok(bytes) => Key::derive_from(&bytes),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Key::generate()
            } else {
                return Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )));
            }
        }
    };

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;
    let pool = DbPool::connect(&database_url)
        .await
        .map_err(|e| std::io::Error::other(format!("failed to build database pool: {e}")))?;

    let accounts: Arc<dyn AccountRepository> =
        Arc::new(DieselAccountRepository::new(pool.clone()));
    let auth_service = Arc::new(PasswordAccountService::new(accounts));
    let state = HttpState {
        clients: Arc::new(DieselClientRepository::new(pool.clone())),
        posts: Arc::new(DieselPostRepository::new(pool)),
        login: auth_service.clone(),
        registration: auth_service,
    };

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());

    HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".into())
            .cookie_path("/".into())
            .cookie_secure(cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(SameSite::Lax)
            .build();

        let app = App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(session)
            .wrap(Trace)
            .service(clients::list_clients)
            .service(clients::new_client_form)
            .service(clients::save_client)
            .service(clients::edit_client_form)
            .service(clients::delete_client)
            .service(posts::search_posts)
            .service(posts::new_post_form)
            .service(posts::save_post)
            .service(posts::edit_post_form)
            .service(posts::delete_post)
            .service(auth::register_form)
            .service(auth::register)
            .service(auth::login_form)
            .service(auth::login)
            .service(auth::logout)
            .service(auth::access_denied)
            .service(auth::about_us);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(bind_addr)?
    .run()
    .await
}
