//! Multi-criteria search dispatch for blog posts.
//!
//! A blog search request may carry up to six optional keyword slots. The
//! dispatcher evaluates them against a fixed priority table and selects
//! exactly one criterion: the first slot that is provided (non-null,
//! non-empty) wins and every other slot is ignored. No slot provided means
//! the unfiltered listing.
//!
//! The selected criterion and its value travel back to the caller inside
//! the per-call [`SearchOutcome`] so the view can echo "you searched by X".
//! Keeping them per call, rather than on a long-lived service object,
//! stops concurrent requests from observing each other's criterion.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::PostRepository;
use crate::domain::post::Post;
use crate::domain::Error;

/// One named search criterion for posts, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum PostCriterion {
    /// Substring of the decimal id.
    Id,
    /// Substring of the post name.
    PostName,
    /// Substring of the publish date.
    Date,
    /// Substring of the review text.
    Text,
    /// Substring of the client name label.
    ClientName,
    /// Substring of the concatenated id+name+date+text+client haystack.
    Keyword,
}

impl PostCriterion {
    /// The request-parameter name this criterion answers to, echoed back
    /// to callers verbatim.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Id => "keywordId",
            Self::PostName => "keywordPostName",
            Self::Date => "keywordDate",
            Self::Text => "keywordText",
            Self::ClientName => "keywordClientName",
            Self::Keyword => "keyword",
        }
    }
}

/// The criterion that fired for a search call, with the value it carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchedCriterion {
    /// Which slot fired.
    pub criterion: PostCriterion,
    /// The keyword the slot carried.
    pub value: String,
}

/// Result of one search call: the records plus the criterion that fired.
///
/// `matched` is `None` for the unfiltered listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome<T> {
    /// Matching records, in storage order.
    pub records: Vec<T>,
    /// The criterion that fired, if any slot was provided.
    pub matched: Option<MatchedCriterion>,
}

impl<T> SearchOutcome<T> {
    /// Outcome for the no-criteria fallback listing.
    pub fn unfiltered(records: Vec<T>) -> Self {
        Self {
            records,
            matched: None,
        }
    }
}

/// The six optional keyword slots of a blog search request.
///
/// `None` and `""` both mean "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PostSearchParams {
    /// Keyword matched against the post id.
    pub keyword_id: Option<String>,
    /// Keyword matched against the post name.
    pub keyword_post_name: Option<String>,
    /// Keyword matched against the publish date.
    pub keyword_date: Option<String>,
    /// Keyword matched against the review text.
    pub keyword_text: Option<String>,
    /// Keyword matched against the client name label.
    pub keyword_client_name: Option<String>,
    /// Generic keyword matched against the concatenated haystack.
    pub keyword: Option<String>,
}

/// Treat empty strings the same as absent parameters.
fn provided(slot: &Option<String>) -> Option<&str> {
    slot.as_deref().filter(|value| !value.is_empty())
}

impl PostSearchParams {
    /// The priority table: slots paired with their criteria, highest first.
    fn slots(&self) -> [(PostCriterion, &Option<String>); 6] {
        [
            (PostCriterion::Id, &self.keyword_id),
            (PostCriterion::PostName, &self.keyword_post_name),
            (PostCriterion::Date, &self.keyword_date),
            (PostCriterion::Text, &self.keyword_text),
            (PostCriterion::ClientName, &self.keyword_client_name),
            (PostCriterion::Keyword, &self.keyword),
        ]
    }

    /// Select the single criterion to apply: the first provided slot in
    /// priority order, or `None` when every slot is absent or empty.
    pub fn resolve(&self) -> Option<MatchedCriterion> {
        self.slots().into_iter().find_map(|(criterion, slot)| {
            provided(slot).map(|value| MatchedCriterion {
                criterion,
                value: value.to_owned(),
            })
        })
    }
}

/// Run one blog search: resolve the winning criterion and fetch the
/// matching posts, or fall back to the unfiltered listing.
pub async fn dispatch_post_search(
    repo: &dyn PostRepository,
    params: &PostSearchParams,
) -> Result<SearchOutcome<Post>, Error> {
    match params.resolve() {
        Some(matched) => {
            let records = repo.search_by(matched.criterion, &matched.value).await?;
            Ok(SearchOutcome {
                records,
                matched: Some(matched),
            })
        }
        None => Ok(SearchOutcome::unfiltered(repo.list().await?)),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{PostPersistenceError, PostRepository};
    use crate::domain::post::PostDraft;
    use async_trait::async_trait;
    use rstest::rstest;
    use std::sync::Mutex;

    fn params(slots: [Option<&str>; 6]) -> PostSearchParams {
        let [id, name, date, text, client, generic] = slots.map(|s| s.map(str::to_owned));
        PostSearchParams {
            keyword_id: id,
            keyword_post_name: name,
            keyword_date: date,
            keyword_text: text,
            keyword_client_name: client,
            keyword: generic,
        }
    }

    #[rstest]
    #[case(
        [Some("7"), Some("review"), None, None, None, None],
        PostCriterion::Id,
        "7"
    )]
    #[case(
        [None, Some("review"), Some("2023"), Some("x"), Some("y"), Some("z")],
        PostCriterion::PostName,
        "review"
    )]
    #[case([None, None, Some("2023"), None, None, Some("z")], PostCriterion::Date, "2023")]
    #[case([None, None, None, Some("great"), None, None], PostCriterion::Text, "great")]
    #[case([None, None, None, None, Some("Ann"), Some("z")], PostCriterion::ClientName, "Ann")]
    #[case([None, None, None, None, None, Some("any")], PostCriterion::Keyword, "any")]
    fn first_provided_slot_wins(
        #[case] slots: [Option<&str>; 6],
        #[case] expected: PostCriterion,
        #[case] value: &str,
    ) {
        let matched = params(slots).resolve().expect("a slot is provided");
        assert_eq!(matched.criterion, expected);
        assert_eq!(matched.value, value);
    }

    #[rstest]
    #[case([None, None, None, None, None, None])]
    #[case([Some(""), Some(""), None, None, None, Some("")])]
    fn absent_and_empty_slots_resolve_to_none(#[case] slots: [Option<&str>; 6]) {
        assert_eq!(params(slots).resolve(), None);
    }

    #[test]
    fn empty_high_priority_slot_yields_to_lower() {
        let matched = params([Some(""), Some("review"), None, None, None, None])
            .resolve()
            .expect("post name slot is provided");
        assert_eq!(matched.criterion, PostCriterion::PostName);
    }

    #[test]
    fn criterion_names_echo_request_parameters() {
        assert_eq!(PostCriterion::Id.name(), "keywordId");
        assert_eq!(PostCriterion::Keyword.name(), "keyword");
    }

    /// In-memory repository recording which call the dispatcher made.
    #[derive(Default)]
    struct RecordingRepo {
        posts: Vec<Post>,
        searched: Mutex<Option<(PostCriterion, String)>>,
        listed: Mutex<bool>,
    }

    #[async_trait]
    impl PostRepository for RecordingRepo {
        async fn list(&self) -> Result<Vec<Post>, PostPersistenceError> {
            *self.listed.lock().expect("lock") = true;
            Ok(self.posts.clone())
        }

        async fn search_by(
            &self,
            criterion: PostCriterion,
            keyword: &str,
        ) -> Result<Vec<Post>, PostPersistenceError> {
            *self.searched.lock().expect("lock") = Some((criterion, keyword.to_owned()));
            Ok(self
                .posts
                .iter()
                .filter(|post| post.matches(criterion, keyword))
                .cloned()
                .collect())
        }

        async fn find_by_id(&self, _id: i64) -> Result<Option<Post>, PostPersistenceError> {
            Ok(None)
        }

        async fn save(&self, _draft: PostDraft) -> Result<Post, PostPersistenceError> {
            Err(PostPersistenceError::query("not under test"))
        }

        async fn delete(&self, _id: i64) -> Result<(), PostPersistenceError> {
            Ok(())
        }
    }

    fn fixture_post(id: i64, post_name: &str) -> Post {
        Post {
            id,
            post_name: post_name.into(),
            publish_date: "2023-04-20".into(),
            text: "great haircut".into(),
            client_name: "Ann Lee".into(),
            vk_link: None,
            link: None,
        }
    }

    #[tokio::test]
    async fn dispatch_runs_single_highest_priority_search() {
        let repo = RecordingRepo {
            posts: vec![fixture_post(7, "review7"), fixture_post(8, "other")],
            ..RecordingRepo::default()
        };
        let query = params([Some("7"), Some("other"), None, None, None, None]);

        let outcome = dispatch_post_search(&repo, &query)
            .await
            .expect("search succeeds");

        // keywordPostName="other" is ignored even though it is provided.
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].id, 7);
        let matched = outcome.matched.expect("a criterion fired");
        assert_eq!(matched.criterion, PostCriterion::Id);
        assert_eq!(matched.value, "7");
        assert_eq!(
            *repo.searched.lock().expect("lock"),
            Some((PostCriterion::Id, "7".to_owned()))
        );
        assert!(!*repo.listed.lock().expect("lock"));
    }

    #[tokio::test]
    async fn dispatch_falls_back_to_full_listing() {
        let repo = RecordingRepo {
            posts: vec![fixture_post(1, "a"), fixture_post(2, "b")],
            ..RecordingRepo::default()
        };

        let outcome = dispatch_post_search(&repo, &PostSearchParams::default())
            .await
            .expect("listing succeeds");

        assert_eq!(outcome.records.len(), 2);
        assert!(outcome.matched.is_none());
        assert!(*repo.listed.lock().expect("lock"));
    }
}
