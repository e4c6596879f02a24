//! Diesel row structs and their conversions to domain values.

use diesel::prelude::*;

use crate::domain::{Account, Client, Post, RoleSet};

use super::schema::{blog, client, user_info};

/// Queryable row for client visit records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = client)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ClientRow {
    pub id: i64,
    pub full_name: String,
    pub visit_date: String,
    pub service: String,
    pub master_name: String,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Self {
            id: row.id,
            full_name: row.full_name,
            visit_date: row.visit_date,
            service: row.service,
            master_name: row.master_name,
        }
    }
}

/// Insertable client row; the id is assigned by the database.
#[derive(Debug, Insertable)]
#[diesel(table_name = client)]
pub(crate) struct NewClientRow<'a> {
    pub full_name: &'a str,
    pub visit_date: &'a str,
    pub service: &'a str,
    pub master_name: &'a str,
}

/// Changeset applied when updating an existing client row.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = client)]
pub(crate) struct ClientChanges<'a> {
    pub full_name: &'a str,
    pub visit_date: &'a str,
    pub service: &'a str,
    pub master_name: &'a str,
}

/// Queryable row for blog posts.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = blog)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub post_id: i64,
    pub post_name: String,
    pub publish_date: String,
    pub text: String,
    pub client_name: String,
    pub vk_link: Option<String>,
    pub link: Option<String>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.post_id,
            post_name: row.post_name,
            publish_date: row.publish_date,
            text: row.text,
            client_name: row.client_name,
            vk_link: row.vk_link,
            link: row.link,
        }
    }
}

/// Insertable blog row; the id is assigned by the database.
#[derive(Debug, Insertable)]
#[diesel(table_name = blog)]
pub(crate) struct NewPostRow<'a> {
    pub post_name: &'a str,
    pub publish_date: &'a str,
    pub text: &'a str,
    pub client_name: &'a str,
    pub vk_link: Option<&'a str>,
    pub link: Option<&'a str>,
}

/// Changeset applied when updating an existing blog row. `None` link
/// values clear the stored column.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = blog)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PostChanges<'a> {
    pub post_name: &'a str,
    pub publish_date: &'a str,
    pub text: &'a str,
    pub client_name: &'a str,
    pub vk_link: Option<&'a str>,
    pub link: Option<&'a str>,
}

/// Queryable row for account credentials.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_info)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: i32,
    pub name: String,
    pub password: String,
    pub roles: String,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            password_hash: row.password,
            roles: RoleSet::parse(&row.roles),
        }
    }
}

/// Insertable account row; the id is assigned by the database.
#[derive(Debug, Insertable)]
#[diesel(table_name = user_info)]
pub(crate) struct NewAccountRow<'a> {
    pub name: &'a str,
    pub password: &'a str,
    pub roles: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_row_parses_roles_once() {
        let account = Account::from(AccountRow {
            id: 1,
            name: "walter".into(),
            password: "$argon2id$stub".into(),
            roles: "ROLE_USER, ROLE_ADMIN".into(),
        });
        assert!(account.roles.is_admin());
        assert!(account.roles.contains("ROLE_USER"));
    }

    #[test]
    fn post_row_maps_id_column() {
        let post = Post::from(PostRow {
            post_id: 17,
            post_name: "review".into(),
            publish_date: "2023-04-20".into(),
            text: "great".into(),
            client_name: "Ann".into(),
            vk_link: None,
            link: Some("https://example.test".into()),
        });
        assert_eq!(post.id, 17);
        assert_eq!(post.link.as_deref(), Some("https://example.test"));
    }
}
