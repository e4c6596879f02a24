//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the page endpoints. Swagger UI serves it in debug builds only.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Client, Error, ErrorCode, MatchedCriterion, Post, PostCriterion};
use crate::inbound::http::auth::{LoginForm, PageView, RegistrationForm};
use crate::inbound::http::clients::{ClientForm, ClientListing};
use crate::inbound::http::posts::{PostForm, PostListing};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login_page or POST /auth/register.",
            ))),
        );
    }
}

/// OpenAPI document for the barbershop page endpoints.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Barbershop backend API",
        description = "Client records, review posts, and session-based access control."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::clients::list_clients,
        crate::inbound::http::clients::new_client_form,
        crate::inbound::http::clients::save_client,
        crate::inbound::http::clients::edit_client_form,
        crate::inbound::http::clients::delete_client,
        crate::inbound::http::posts::search_posts,
        crate::inbound::http::posts::new_post_form,
        crate::inbound::http::posts::save_post,
        crate::inbound::http::posts::edit_post_form,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::auth::register_form,
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login_form,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::access_denied,
        crate::inbound::http::auth::about_us,
    ),
    components(schemas(
        Client,
        ClientForm,
        ClientListing,
        Post,
        PostForm,
        PostListing,
        PostCriterion,
        MatchedCriterion,
        RegistrationForm,
        LoginForm,
        PageView,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "clients", description = "Client visit records"),
        (name = "posts", description = "Blog review posts"),
        (name = "auth", description = "Registration, login and access control")
    )
)]
pub struct ApiDoc;
