//! Reverse lookup: which users hold a given phone number.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use contact_book_core::UserId;

use crate::db::{ContactRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::extract::ApiQuery;
use crate::state::AppState;

const FIND_FAILED: &str = "Error finding common users";

/// Query of `GET /find-common-users`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonUsersQuery {
    pub search_number: String,
}

/// Owners of a number.
///
/// `Name` is the name of the lowest-id owner, or `""` when nobody holds the
/// number. `commonUsers` lists one owner id per matching contact, in contact
/// order, without deduplication.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CommonUsersResponse {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "commonUsers")]
    pub common_users: Vec<UserId>,
}

/// Find the users whose contact lists hold exactly `searchNumber`.
///
/// GET /find-common-users?searchNumber=..
///
/// Matching is exact and case-sensitive; numbers are not normalized.
#[instrument(skip(state, query))]
pub async fn find_common_users(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CommonUsersQuery>,
) -> Result<Json<CommonUsersResponse>> {
    let common_users = ContactRepository::new(state.pool())
        .owner_ids_by_number(&query.search_number)
        .await
        .map_err(|e| AppError::store(FIND_FAILED, e))?;

    let owners = UserRepository::new(state.pool())
        .get_by_ids(&common_users)
        .await
        .map_err(|e| AppError::store(FIND_FAILED, e))?;

    let name = owners
        .into_iter()
        .next()
        .map(|user| user.name)
        .unwrap_or_default();

    tracing::debug!(matches = common_users.len(), "Found common users");
    Ok(Json(CommonUsersResponse { name, common_users }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use sqlx::PgPool;

    use super::*;
    use crate::models::NewContact;
    use crate::test_support::{app_with_pool, lazy_app, request, send};

    #[test]
    fn test_response_field_names() {
        let response = CommonUsersResponse {
            name: "Alice".to_owned(),
            common_users: vec![UserId::new(3), UserId::new(3)],
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"Name": "Alice", "commonUsers": [3, 3]})
        );
    }

    #[tokio::test]
    async fn test_requires_search_number() {
        let req = request(Method::GET, "/find-common-users", None);
        let (status, body) = send(lazy_app(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
    }

    async fn add_contact(pool: &PgPool, user_id: UserId, name: &str, number: &str) {
        let contact: NewContact =
            serde_json::from_value(json!({"name": name, "number": number})).unwrap();
        ContactRepository::new(pool)
            .insert_unless_duplicate(user_id, &contact)
            .await
            .unwrap();
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires PostgreSQL (DATABASE_URL)"]
    async fn test_unmatched_number(pool: PgPool) {
        let req = request(Method::GET, "/find-common-users?searchNumber=555-0000", None);
        let (status, body) = send(app_with_pool(pool), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"Name": "", "commonUsers": []}));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires PostgreSQL (DATABASE_URL)"]
    async fn test_number_shared_by_two_users(pool: PgPool) {
        let users = UserRepository::new(&pool);
        let alice = users.create("Alice").await.unwrap();
        let bob = users.create("Bob").await.unwrap();
        let carol = users.create("Carol").await.unwrap();
        add_contact(&pool, alice.id, "Dentist", "+1 555 0100").await;
        add_contact(&pool, bob.id, "Dr. Smith", "+1 555 0100").await;
        add_contact(&pool, carol.id, "Dentist", "+15550100").await;

        let req = request(
            Method::GET,
            "/find-common-users?searchNumber=%2B1%20555%200100",
            None,
        );
        let (status, body) = send(app_with_pool(pool), req).await;
        assert_eq!(status, StatusCode::OK);

        let mut ids: Vec<i64> = body["commonUsers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|id| id.as_i64().unwrap())
            .collect();
        ids.sort_unstable();
        assert_eq!(
            ids,
            [i64::from(alice.id.as_i32()), i64::from(bob.id.as_i32())]
        );
        assert!(["Alice", "Bob"].contains(&body["Name"].as_str().unwrap()));
    }
}
