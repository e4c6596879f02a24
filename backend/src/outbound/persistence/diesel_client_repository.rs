//! PostgreSQL-backed `ClientRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Text};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ClientPersistenceError, ClientRepository};
use crate::domain::{Client, ClientDraft};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ClientChanges, ClientRow, NewClientRow};
use super::pool::{DbPool, PoolError};
use super::schema::client;

/// Diesel-backed implementation of the client repository port.
#[derive(Clone)]
pub struct DieselClientRepository {
    pool: DbPool,
}

impl DieselClientRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> ClientPersistenceError {
    map_pool_error(error, ClientPersistenceError::connection)
}

fn map_diesel(error: diesel::result::Error) -> ClientPersistenceError {
    map_diesel_error(
        error,
        ClientPersistenceError::query,
        ClientPersistenceError::connection,
    )
}

#[async_trait]
impl ClientRepository for DieselClientRepository {
    async fn list(&self) -> Result<Vec<Client>, ClientPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let rows = client::table
            .select(ClientRow::as_select())
            .order(client::id.asc())
            .load::<ClientRow>(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(rows.into_iter().map(Client::from).collect())
    }

    /// Match the keyword against the concatenated id+name+date+service+master
    /// haystack, mirroring the in-memory matching rule. The concatenation has
    /// no separators, so a keyword may span adjacent fields, and `%` and `_`
    /// act as `LIKE` wildcards.
    async fn search(&self, keyword: &str) -> Result<Vec<Client>, ClientPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let rows = client::table
            .select(ClientRow::as_select())
            .filter(
                sql::<Bool>(
                    "(CAST(id AS TEXT) || full_name || visit_date || service || master_name) LIKE ",
                )
                .bind::<Text, _>(format!("%{keyword}%")),
            )
            .order(client::id.asc())
            .load::<ClientRow>(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(rows.into_iter().map(Client::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Client>, ClientPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row = client::table
            .find(id)
            .select(ClientRow::as_select())
            .first::<ClientRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        Ok(row.map(Client::from))
    }

    async fn save(&self, draft: ClientDraft) -> Result<Client, ClientPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row = match draft.id {
            Some(id) => {
                let updated = diesel::update(client::table.find(id))
                    .set(ClientChanges {
                        full_name: &draft.full_name,
                        visit_date: &draft.visit_date,
                        service: &draft.service,
                        master_name: &draft.master_name,
                    })
                    .returning(ClientRow::as_returning())
                    .get_result::<ClientRow>(&mut conn)
                    .await;
                match updated {
                    // Saving an id with no backing row inserts it; save is
                    // an upsert keyed on id presence, not row existence.
                    Err(diesel::result::Error::NotFound) => {
                        diesel::insert_into(client::table)
                            .values((
                                client::id.eq(id),
                                client::full_name.eq(&draft.full_name),
                                client::visit_date.eq(&draft.visit_date),
                                client::service.eq(&draft.service),
                                client::master_name.eq(&draft.master_name),
                            ))
                            .returning(ClientRow::as_returning())
                            .get_result::<ClientRow>(&mut conn)
                            .await
                    }
                    other => other,
                }
            }
            None => {
                diesel::insert_into(client::table)
                    .values(NewClientRow {
                        full_name: &draft.full_name,
                        visit_date: &draft.visit_date,
                        service: &draft.service,
                        master_name: &draft.master_name,
                    })
                    .returning(ClientRow::as_returning())
                    .get_result::<ClientRow>(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel)?;
        Ok(Client::from(row))
    }

    async fn delete(&self, id: i64) -> Result<(), ClientPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        // Deleting a missing id affects zero rows; that is not an error.
        diesel::delete(client::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(())
    }
}
