//! Contact sync and listing handlers.

use axum::{Json, extract::State};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use contact_book_core::{Page, PageRequest, UserId};

use crate::db::{ContactRepository, RepositoryError, UserRepository};
use crate::error::{AppError, Result};
use crate::extract::{ApiJson, ApiQuery};
use crate::models::{Contact, NewContact};
use crate::state::AppState;

const SYNC_FAILED: &str = "Error syncing contacts";
const LIST_FAILED: &str = "Error getting contacts";

/// Body of `POST /sync-contacts`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncContactsRequest {
    pub user_id: UserId,
    pub contacts: Vec<NewContact>,
}

/// Successful sync.
///
/// `inserted + skipped` always equals the number of submitted contacts.
#[derive(Debug, Serialize)]
pub struct SyncContactsResponse {
    pub success: bool,
    pub message: &'static str,
    pub inserted: usize,
    pub skipped: usize,
}

/// Query of `GET /get-contacts`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetContactsQuery {
    pub user_id: UserId,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search_text: Option<String>,
}

/// Store a batch of contacts for a user, skipping numbers the user already holds.
///
/// POST /sync-contacts
///
/// Every insert is issued at once and runs independently; there is no shared
/// transaction. The response is sent after all of them have settled. If any
/// insert failed the whole call answers 500, even though the others are kept.
#[instrument(skip(state, request), fields(user_id = %request.user_id, contacts = request.contacts.len()))]
pub async fn sync_contacts(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SyncContactsRequest>,
) -> Result<Json<SyncContactsResponse>> {
    let user = UserRepository::new(state.pool())
        .get_by_id(request.user_id)
        .await
        .map_err(|e| AppError::store(SYNC_FAILED, e))?;

    if user.is_none() {
        return Err(AppError::NotFound("User not found".to_owned()));
    }

    let repo = ContactRepository::new(state.pool());
    let outcomes = join_all(
        request
            .contacts
            .iter()
            .map(|contact| repo.insert_unless_duplicate(request.user_id, contact)),
    )
    .await;

    let tally = SyncTally::from_outcomes(outcomes);
    if let Some(first) = tally.first_failure {
        tracing::warn!(
            inserted = tally.inserted,
            skipped = tally.skipped,
            failed = tally.failed,
            "Contact sync partially failed"
        );
        return Err(AppError::store(SYNC_FAILED, first));
    }

    tracing::info!(
        inserted = tally.inserted,
        skipped = tally.skipped,
        "Contacts synced"
    );

    Ok(Json(SyncContactsResponse {
        success: true,
        message: "Data saved successfully",
        inserted: tally.inserted,
        skipped: tally.skipped,
    }))
}

/// List one page of a user's contacts.
///
/// GET /get-contacts?userId=..&page=..&pageSize=..&searchText=..
///
/// Unknown users get an empty page rather than 404.
#[instrument(skip(state, query), fields(user_id = %query.user_id))]
pub async fn get_contacts(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<GetContactsQuery>,
) -> Result<Json<Page<Contact>>> {
    let window = PageRequest::from_query(query.page, query.page_size)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let page = ContactRepository::new(state.pool())
        .list_for_user(query.user_id, query.search_text.as_deref(), window)
        .await
        .map_err(|e| AppError::store(LIST_FAILED, e))?;

    tracing::debug!(
        total_count = page.total_count,
        rows = page.rows.len(),
        "Listed contacts"
    );
    Ok(Json(page))
}

/// Per-contact results of a sync, counted.
#[derive(Debug, Default)]
struct SyncTally {
    inserted: usize,
    skipped: usize,
    failed: usize,
    first_failure: Option<RepositoryError>,
}

impl SyncTally {
    fn from_outcomes(
        outcomes: impl IntoIterator<Item = std::result::Result<bool, RepositoryError>>,
    ) -> Self {
        outcomes
            .into_iter()
            .fold(Self::default(), |mut tally, outcome| {
                match outcome {
                    Ok(true) => tally.inserted += 1,
                    Ok(false) => tally.skipped += 1,
                    Err(e) => {
                        tally.failed += 1;
                        tally.first_failure.get_or_insert(e);
                    }
                }
                tally
            })
    }
}
