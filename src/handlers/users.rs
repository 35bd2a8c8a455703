use crate::core::error::ResourceError;
use crate::core::state::AppState;
use crate::models::user::User;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

const ENTITY: &str = "User";

/// GET /users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<User>>, ResourceError> {
    let users = state
        .users
        .list()
        .await
        .map_err(|e| ResourceError::from_store(ENTITY, e))?;

    Ok(Json(users))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<User>, ResourceError> {
    state
        .users
        .get(id)
        .await
        .map_err(|e| ResourceError::from_store(ENTITY, e))?
        .map(Json)
        .ok_or(ResourceError::NotFound { entity: ENTITY, id })
}

/// POST /users
///
/// The id in the body is used as is. Answers 201 with a Location header.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<User>, JsonRejection>,
) -> Result<Response, ResourceError> {
    let Json(user) = payload?;

    state.users.insert(&user).await.map_err(|e| {
        warn!(user_id = user.id, error = %e, "User insert failed");
        ResourceError::from_store(ENTITY, e)
    })?;

    info!(user_id = user.id, username = %user.username, "User created");

    let location = format!("/users/{}", user.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(user)).into_response())
}

/// PUT /users/{id}
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    payload: Result<Json<User>, JsonRejection>,
) -> Result<StatusCode, ResourceError> {
    let Json(user) = payload?;

    if id != user.id {
        warn!(path_id = id, body_id = user.id, "User update id mismatch");
        return Err(ResourceError::IdMismatch { path_id: id, body_id: user.id });
    }

    let updated = state
        .users
        .update(&user)
        .await
        .map_err(|e| ResourceError::from_store(ENTITY, e))?;

    if !updated {
        return Err(ResourceError::NotFound { entity: ENTITY, id });
    }

    info!(user_id = id, "User updated");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ResourceError> {
    let deleted = state
        .users
        .delete(id)
        .await
        .map_err(|e| ResourceError::from_store(ENTITY, e))?;

    if !deleted {
        return Err(ResourceError::NotFound { entity: ENTITY, id });
    }

    info!(user_id = id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::create_test_state;

    const UNUSED_UPSTREAM: &str = "http://127.0.0.1:9";

    fn john() -> User {
        User::new(1, "John", "password", "100")
    }

    #[tokio::test]
    async fn test_list_users() {
        let state = create_test_state(UNUSED_UPSTREAM).await;
        state.users.insert(&john()).await.unwrap();
        state.users.insert(&User::new(2, "Jane", "password", "200")).await.unwrap();

        let Json(users) = list_users(State(state)).await.unwrap();

        assert_eq!(users.len(), 2);
        assert!(users.contains(&john()));
    }

    #[tokio::test]
    async fn test_get_user_with_valid_id() {
        let state = create_test_state(UNUSED_UPSTREAM).await;
        state.users.insert(&john()).await.unwrap();

        let Json(user) = get_user(State(state), Path(1)).await.unwrap();

        assert_eq!(user, john());
    }

    #[tokio::test]
    async fn test_get_user_with_invalid_id() {
        let state = create_test_state(UNUSED_UPSTREAM).await;

        let result = get_user(State(state), Path(999)).await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_user() {
        let state = create_test_state(UNUSED_UPSTREAM).await;

        let response = create_user(State(state.clone()), Ok(Json(john()))).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/users/1");
        assert_eq!(state.users.get(1).await.unwrap(), Some(john()));
    }

    #[tokio::test]
    async fn test_create_user_duplicate_id() {
        let state = create_test_state(UNUSED_UPSTREAM).await;
        state.users.insert(&john()).await.unwrap();

        let result = create_user(State(state), Ok(Json(john()))).await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_update_user() {
        let state = create_test_state(UNUSED_UPSTREAM).await;
        state.users.insert(&john()).await.unwrap();
        let updated = User::new(1, "John Updated", "newpassword", "200");

        let status = update_user(State(state.clone()), Path(1), Ok(Json(updated.clone())))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(state.users.get(1).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_user_with_mismatched_id() {
        let state = create_test_state(UNUSED_UPSTREAM).await;
        state.users.insert(&john()).await.unwrap();

        // rejected whether or not the path id exists
        for path_id in [1, 2] {
            let result = update_user(
                State(state.clone()),
                Path(path_id),
                Ok(Json(User::new(3, "John Updated", "newpassword", "200"))),
            )
            .await;

            let response = result.unwrap_err().into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }

        assert_eq!(state.users.get(1).await.unwrap(), Some(john()));
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let state = create_test_state(UNUSED_UPSTREAM).await;

        let result = update_user(State(state), Path(1), Ok(Json(john()))).await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_user() {
        let state = create_test_state(UNUSED_UPSTREAM).await;
        state.users.insert(&john()).await.unwrap();

        let status = delete_user(State(state.clone()), Path(1)).await.unwrap();

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(state.users.list().await.unwrap().is_empty());

        let response = get_user(State(state), Path(1)).await.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_user_with_invalid_id() {
        let state = create_test_state(UNUSED_UPSTREAM).await;

        let result = delete_user(State(state), Path(999)).await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_user_with_missing_field_is_bad_request() {
        use crate::core::routes::build_router;
        use axum::body::Body;
        use axum::http::Request;
        use http_body_util::BodyExt;
        use tower::ServiceExt;

        let state = create_test_state(UNUSED_UPSTREAM).await;
        let request = Request::builder()
            .method("POST")
            .uri("/users")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"id":1,"username":"x"}"#))
            .unwrap();

        let response = build_router(state.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("password"));
        assert!(state.users.list().await.unwrap().is_empty());
    }
}
