//! Blog post page handlers.
//!
//! ```text
//! GET  /blog                   list/search posts by up to six criteria
//! GET  /new_post               blank post form payload
//! POST /save_post              upsert a post, redirect to /blog
//! GET  /edit_post/{post_id}    post edit payload
//! GET  /delete_post/{post_id}  delete a post, redirect to /blog
//! ```
//!
//! The six optional search parameters are evaluated in fixed priority
//! order (id, name, date, text, client name, generic keyword); the first
//! one provided wins and the rest are ignored. The response echoes which
//! criterion fired so the page can render "you searched by X".

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    dispatch_post_search, Error, MatchedCriterion, Post, PostDraft, PostSearchParams,
};
use crate::inbound::http::see_other;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// The six optional keyword slots of a blog search request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PostSearchQuery {
    /// Substring of the post id.
    pub keyword_id: Option<String>,
    /// Substring of the post name.
    pub keyword_post_name: Option<String>,
    /// Substring of the publish date.
    pub keyword_date: Option<String>,
    /// Substring of the review text.
    pub keyword_text: Option<String>,
    /// Substring of the client name label.
    pub keyword_client_name: Option<String>,
    /// Substring of the concatenated field haystack.
    pub keyword: Option<String>,
}

impl From<PostSearchQuery> for PostSearchParams {
    fn from(query: PostSearchQuery) -> Self {
        Self {
            keyword_id: query.keyword_id,
            keyword_post_name: query.keyword_post_name,
            keyword_date: query.keyword_date,
            keyword_text: query.keyword_text,
            keyword_client_name: query.keyword_client_name,
            keyword: query.keyword,
        }
    }
}

/// Post listing payload, echoing the criterion that filtered it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostListing {
    /// Matching posts, in storage order.
    pub posts: Vec<Post>,
    /// The criterion that fired, when one was provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<MatchedCriterion>,
}

/// Form payload for saving a post. All fields are accepted as-is.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct PostForm {
    /// Present when updating an existing record.
    pub id: Option<i64>,
    #[serde(default)]
    pub post_name: String,
    #[serde(default)]
    pub publish_date: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub vk_link: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl From<PostForm> for PostDraft {
    fn from(form: PostForm) -> Self {
        Self {
            id: form.id,
            post_name: form.post_name,
            publish_date: form.publish_date,
            text: form.text,
            client_name: form.client_name,
            vk_link: form.vk_link,
            link: form.link,
        }
    }
}

/// List posts, filtered by at most one of the six criteria.
#[utoipa::path(
    get,
    path = "/blog",
    params(PostSearchQuery),
    responses(
        (status = 200, description = "Post listing", body = PostListing),
        (status = 303, description = "Anonymous caller redirected to login")
    ),
    tags = ["posts"],
    operation_id = "searchPosts"
)]
#[get("/blog")]
pub async fn search_posts(
    session: SessionContext,
    state: web::Data<HttpState>,
    query: web::Query<PostSearchQuery>,
) -> ApiResult<web::Json<PostListing>> {
    session.require_identity()?;
    let params = PostSearchParams::from(query.into_inner());
    let outcome = dispatch_post_search(state.posts.as_ref(), &params).await?;
    Ok(web::Json(PostListing {
        posts: outcome.records,
        matched: outcome.matched,
    }))
}

/// Blank post form payload.
#[utoipa::path(
    get,
    path = "/new_post",
    responses(
        (status = 200, description = "Blank post form", body = PostForm),
        (status = 303, description = "Anonymous caller redirected to login")
    ),
    tags = ["posts"],
    operation_id = "newPostForm"
)]
#[get("/new_post")]
pub async fn new_post_form(session: SessionContext) -> ApiResult<web::Json<PostForm>> {
    session.require_identity()?;
    Ok(web::Json(PostForm::default()))
}

/// Upsert a post and redirect back to the blog listing.
#[utoipa::path(
    post,
    path = "/save_post",
    responses(
        (status = 303, description = "Saved; redirect to /blog")
    ),
    tags = ["posts"],
    operation_id = "savePost"
)]
#[post("/save_post")]
pub async fn save_post(
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<PostForm>,
) -> ApiResult<HttpResponse> {
    session.require_identity()?;
    state.posts.save(form.into_inner().into()).await?;
    Ok(see_other("/blog"))
}

/// Edit payload for an existing post.
#[utoipa::path(
    get,
    path = "/edit_post/{post_id}",
    params(("post_id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post to edit", body = Post),
        (status = 303, description = "Anonymous caller redirected to login"),
        (status = 404, description = "No such post", body = Error)
    ),
    tags = ["posts"],
    operation_id = "editPostForm"
)]
#[get("/edit_post/{post_id}")]
pub async fn edit_post_form(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Post>> {
    session.require_identity()?;
    let id = path.into_inner();
    let found = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::not_found(format!("no post with id {id}")))?;
    Ok(web::Json(found))
}

/// Delete a post by id and redirect back to the blog listing.
#[utoipa::path(
    get,
    path = "/delete_post/{post_id}",
    params(("post_id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 303, description = "Deleted; redirect to /blog")
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[get("/delete_post/{post_id}")]
pub async fn delete_post(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    session.require_identity()?;
    state.posts.delete(path.into_inner()).await?;
    Ok(see_other("/blog"))
}
