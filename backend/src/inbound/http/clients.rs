//! Client page handlers.
//!
//! ```text
//! GET  /            list clients, optional ?keyword= filter
//! GET  /new         blank client form payload (admin only)
//! POST /save        upsert a client, redirect to /
//! GET  /edit/{id}   client edit payload (admin only)
//! GET  /delete/{id} delete a client, redirect to /
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Client, ClientDraft, Error};
use crate::inbound::http::see_other;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Optional keyword filter for the client listing.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ClientSearchQuery {
    /// Case-sensitive substring matched against the concatenated
    /// id+name+date+service+master haystack.
    pub keyword: Option<String>,
}

/// Client listing payload, echoing the keyword that filtered it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientListing {
    /// Matching clients, in storage order.
    pub clients: Vec<Client>,
    /// The keyword that filtered the listing, when one was provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

/// Form payload for saving a client. All fields are accepted as-is.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ClientForm {
    /// Present when updating an existing record.
    pub id: Option<i64>,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub visit_date: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub master_name: String,
}

impl From<ClientForm> for ClientDraft {
    fn from(form: ClientForm) -> Self {
        Self {
            id: form.id,
            full_name: form.full_name,
            visit_date: form.visit_date,
            service: form.service,
            master_name: form.master_name,
        }
    }
}

/// Treat empty strings the same as absent parameters.
fn provided(slot: Option<String>) -> Option<String> {
    slot.filter(|value| !value.is_empty())
}

/// List clients, optionally filtered by a single keyword.
#[utoipa::path(
    get,
    path = "/",
    params(ClientSearchQuery),
    responses(
        (status = 200, description = "Client listing", body = ClientListing),
        (status = 303, description = "Anonymous caller redirected to login")
    ),
    tags = ["clients"],
    operation_id = "listClients"
)]
#[get("/")]
pub async fn list_clients(
    session: SessionContext,
    state: web::Data<HttpState>,
    query: web::Query<ClientSearchQuery>,
) -> ApiResult<web::Json<ClientListing>> {
    session.require_identity()?;
    let keyword = provided(query.into_inner().keyword);
    let clients = match keyword.as_deref() {
        Some(kw) => state.clients.search(kw).await?,
        None => state.clients.list().await?,
    };
    Ok(web::Json(ClientListing { clients, keyword }))
}

/// Blank client form payload; requires the admin role.
#[utoipa::path(
    get,
    path = "/new",
    responses(
        (status = 200, description = "Blank client form", body = ClientForm),
        (status = 303, description = "Redirect to login or access-denied page")
    ),
    tags = ["clients"],
    operation_id = "newClientForm"
)]
#[get("/new")]
pub async fn new_client_form(session: SessionContext) -> ApiResult<web::Json<ClientForm>> {
    session.require_admin()?;
    Ok(web::Json(ClientForm::default()))
}

/// Upsert a client and redirect back to the listing.
#[utoipa::path(
    post,
    path = "/save",
    responses(
        (status = 303, description = "Saved; redirect to /")
    ),
    tags = ["clients"],
    operation_id = "saveClient"
)]
#[post("/save")]
pub async fn save_client(
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<ClientForm>,
) -> ApiResult<HttpResponse> {
    session.require_identity()?;
    state.clients.save(form.into_inner().into()).await?;
    Ok(see_other("/"))
}

/// Edit payload for an existing client; requires the admin role.
#[utoipa::path(
    get,
    path = "/edit/{id}",
    params(("id" = i64, Path, description = "Client identifier")),
    responses(
        (status = 200, description = "Client to edit", body = Client),
        (status = 303, description = "Redirect to login or access-denied page"),
        (status = 404, description = "No such client", body = Error)
    ),
    tags = ["clients"],
    operation_id = "editClientForm"
)]
#[get("/edit/{id}")]
pub async fn edit_client_form(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Client>> {
    session.require_admin()?;
    let id = path.into_inner();
    let client = state
        .clients
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::not_found(format!("no client with id {id}")))?;
    Ok(web::Json(client))
}

/// Delete a client by id and redirect back to the listing.
///
/// Deleting an id that does not exist succeeds; the operation is
/// idempotent at this layer.
#[utoipa::path(
    get,
    path = "/delete/{id}",
    params(("id" = i64, Path, description = "Client identifier")),
    responses(
        (status = 303, description = "Deleted; redirect to /")
    ),
    tags = ["clients"],
    operation_id = "deleteClient"
)]
#[get("/delete/{id}")]
pub async fn delete_client(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    session.require_identity()?;
    state.clients.delete(path.into_inner()).await?;
    Ok(see_other("/"))
}
