//! PostgreSQL-backed `PostRepository` implementation using Diesel.
//!
//! Each search criterion becomes a single `LIKE` filter on a boxed query.
//! The id criterion matches the decimal rendering of the id as a substring,
//! and the generic keyword criterion matches a separator-free concatenation
//! of every field except the links, both mirroring the domain matching
//! rules. `%` and `_` in a keyword act as `LIKE` wildcards here.

use async_trait::async_trait;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Text};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PostPersistenceError, PostRepository};
use crate::domain::{Post, PostCriterion, PostDraft};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewPostRow, PostChanges, PostRow};
use super::pool::{DbPool, PoolError};
use super::schema::blog;

/// Diesel-backed implementation of the post repository port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> PostPersistenceError {
    map_pool_error(error, PostPersistenceError::connection)
}

fn map_diesel(error: diesel::result::Error) -> PostPersistenceError {
    map_diesel_error(
        error,
        PostPersistenceError::query,
        PostPersistenceError::connection,
    )
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn list(&self) -> Result<Vec<Post>, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let rows = blog::table
            .select(PostRow::as_select())
            .order(blog::post_id.asc())
            .load::<PostRow>(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn search_by(
        &self,
        criterion: PostCriterion,
        keyword: &str,
    ) -> Result<Vec<Post>, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let pattern = format!("%{keyword}%");
        let query = blog::table
            .select(PostRow::as_select())
            .order(blog::post_id.asc())
            .into_boxed();
        let query = match criterion {
            PostCriterion::Id => query
                .filter(sql::<Bool>("CAST(post_id AS TEXT) LIKE ").bind::<Text, _>(pattern)),
            PostCriterion::PostName => query.filter(blog::post_name.like(pattern)),
            PostCriterion::Date => query.filter(blog::publish_date.like(pattern)),
            PostCriterion::Text => query.filter(blog::text.like(pattern)),
            PostCriterion::ClientName => query.filter(blog::client_name.like(pattern)),
            PostCriterion::Keyword => query.filter(
                sql::<Bool>(
                    "(CAST(post_id AS TEXT) || post_name || publish_date || text || client_name) LIKE ",
                )
                .bind::<Text, _>(pattern),
            ),
        };
        let rows = query
            .load::<PostRow>(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row = blog::table
            .find(id)
            .select(PostRow::as_select())
            .first::<PostRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        Ok(row.map(Post::from))
    }

    async fn save(&self, draft: PostDraft) -> Result<Post, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row = match draft.id {
            Some(id) => {
                let updated = diesel::update(blog::table.find(id))
                    .set(PostChanges {
                        post_name: &draft.post_name,
                        publish_date: &draft.publish_date,
                        text: &draft.text,
                        client_name: &draft.client_name,
                        vk_link: draft.vk_link.as_deref(),
                        link: draft.link.as_deref(),
                    })
                    .returning(PostRow::as_returning())
                    .get_result::<PostRow>(&mut conn)
                    .await;
                match updated {
                    // Saving an id with no backing row inserts it; save is
                    // an upsert keyed on id presence, not row existence.
                    Err(diesel::result::Error::NotFound) => {
                        diesel::insert_into(blog::table)
                            .values((
                                blog::post_id.eq(id),
                                blog::post_name.eq(&draft.post_name),
                                blog::publish_date.eq(&draft.publish_date),
                                blog::text.eq(&draft.text),
                                blog::client_name.eq(&draft.client_name),
                                blog::vk_link.eq(draft.vk_link.as_deref()),
                                blog::link.eq(draft.link.as_deref()),
                            ))
                            .returning(PostRow::as_returning())
                            .get_result::<PostRow>(&mut conn)
                            .await
                    }
                    other => other,
                }
            }
            None => {
                diesel::insert_into(blog::table)
                    .values(NewPostRow {
                        post_name: &draft.post_name,
                        publish_date: &draft.publish_date,
                        text: &draft.text,
                        client_name: &draft.client_name,
                        vk_link: draft.vk_link.as_deref(),
                        link: draft.link.as_deref(),
                    })
                    .returning(PostRow::as_returning())
                    .get_result::<PostRow>(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel)?;
        Ok(Post::from(row))
    }

    async fn delete(&self, id: i64) -> Result<(), PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        // Deleting a missing id affects zero rows; that is not an error.
        diesel::delete(blog::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(())
    }
}
