//! Blog post data model.
//!
//! A post is a blog-style review left by a client. The `client_name`
//! field is a denormalised label, not a foreign key: deleting the client
//! it names does not remove the post.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::search::PostCriterion;

/// A persisted blog post.
///
/// ## Invariants
/// - `id` is assigned by the store on first save and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Store-assigned identifier.
    pub id: i64,
    /// Title of the post.
    pub post_name: String,
    /// Publish date, kept as the free-form string the caller submitted.
    pub publish_date: String,
    /// Review body.
    pub text: String,
    /// Label naming the client who wrote the review. Soft reference only.
    pub client_name: String,
    /// Optional external profile link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vk_link: Option<String>,
    /// Optional external link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Post {
    /// Concatenation of the searchable fields in id, name, date, text,
    /// client order, used by the generic keyword criterion. The optional
    /// link fields are not searchable.
    pub fn haystack(&self) -> String {
        format!(
            "{}{}{}{}{}",
            self.id, self.post_name, self.publish_date, self.text, self.client_name
        )
    }

    /// Case-sensitive substring match of `keyword` against the field the
    /// criterion names.
    ///
    /// The SQL-backed store evaluates the same contract with `LIKE`, where
    /// `%` and `_` in the keyword act as wildcards rather than literals.
    pub fn matches(&self, criterion: PostCriterion, keyword: &str) -> bool {
        match criterion {
            PostCriterion::Id => self.id.to_string().contains(keyword),
            PostCriterion::PostName => self.post_name.contains(keyword),
            PostCriterion::Date => self.publish_date.contains(keyword),
            PostCriterion::Text => self.text.contains(keyword),
            PostCriterion::ClientName => self.client_name.contains(keyword),
            PostCriterion::Keyword => self.haystack().contains(keyword),
        }
    }

    /// The draft that would re-create this record on save.
    pub fn to_draft(&self) -> PostDraft {
        PostDraft {
            id: Some(self.id),
            post_name: self.post_name.clone(),
            publish_date: self.publish_date.clone(),
            text: self.text.clone(),
            client_name: self.client_name.clone(),
            vk_link: self.vk_link.clone(),
            link: self.link.clone(),
        }
    }
}

/// Payload for saving a post; `id: None` inserts, `id: Some(_)` updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
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
