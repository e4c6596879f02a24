//! Client data model.
//!
//! A client is a barbershop visit record: who came, when, which service
//! was performed, and by which master. Field values are stored as the
//! caller supplied them; no validation is applied.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A persisted client record.
///
/// ## Invariants
/// - `id` is assigned by the store on first save and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Store-assigned identifier.
    pub id: i64,
    /// Client full name.
    pub full_name: String,
    /// Visit date, kept as the free-form string the caller submitted.
    pub visit_date: String,
    /// Description of the service performed.
    pub service: String,
    /// Name of the master who served the client.
    pub master_name: String,
}

impl Client {
    /// Concatenation of all fields, in id, name, date, service, master
    /// order, used by the generic keyword search.
    pub fn haystack(&self) -> String {
        format!(
            "{}{}{}{}{}",
            self.id, self.full_name, self.visit_date, self.service, self.master_name
        )
    }

    /// Case-sensitive substring match of `keyword` against the
    /// concatenated field haystack.
    ///
    /// The SQL-backed store evaluates the same contract with `LIKE`, where
    /// `%` and `_` in the keyword act as wildcards rather than literals.
    pub fn matches(&self, keyword: &str) -> bool {
        self.haystack().contains(keyword)
    }

    /// The draft that would re-create this record on save.
    pub fn to_draft(&self) -> ClientDraft {
        ClientDraft {
            id: Some(self.id),
            full_name: self.full_name.clone(),
            visit_date: self.visit_date.clone(),
            service: self.service.clone(),
            master_name: self.master_name.clone(),
        }
    }
}

/// Payload for saving a client.
///
/// `id: None` inserts a new record and the store assigns the identifier;
/// `id: Some(_)` updates the existing record in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientDraft {
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
