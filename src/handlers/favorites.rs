use crate::core::error::ResourceError;
use crate::core::state::AppState;
use crate::models::favorite::Favorite;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

const ENTITY: &str = "Favorite";

/// GET /favorites
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Favorite>>, ResourceError> {
    let favorites = state
        .favorites
        .list()
        .await
        .map_err(|e| ResourceError::from_store(ENTITY, e))?;

    Ok(Json(favorites))
}

/// GET /favorites/{id}
pub async fn get_favorite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Favorite>, ResourceError> {
    state
        .favorites
        .get(id)
        .await
        .map_err(|e| ResourceError::from_store(ENTITY, e))?
        .map(Json)
        .ok_or(ResourceError::NotFound { entity: ENTITY, id })
}

/// POST /favorites
pub async fn create_favorite(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Favorite>, JsonRejection>,
) -> Result<Response, ResourceError> {
    let Json(favorite) = payload?;

    state.favorites.insert(&favorite).await.map_err(|e| {
        warn!(favorite_id = favorite.id, error = %e, "Favorite insert failed");
        ResourceError::from_store(ENTITY, e)
    })?;

    info!(
        favorite_id = favorite.id,
        city = %favorite.city,
        user_id = favorite.user_id,
        "Favorite created"
    );

    let location = format!("/favorites/{}", favorite.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(favorite)).into_response())
}

/// PUT /favorites/{id}
pub async fn update_favorite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    payload: Result<Json<Favorite>, JsonRejection>,
) -> Result<StatusCode, ResourceError> {
    let Json(favorite) = payload?;

    if id != favorite.id {
        warn!(path_id = id, body_id = favorite.id, "Favorite update id mismatch");
        return Err(ResourceError::IdMismatch { path_id: id, body_id: favorite.id });
    }

    if !state
        .favorites
        .update(&favorite)
        .await
        .map_err(|e| ResourceError::from_store(ENTITY, e))?
    {
        return Err(ResourceError::NotFound { entity: ENTITY, id });
    }

    info!(favorite_id = id, city = %favorite.city, "Favorite updated");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /favorites/{id}
pub async fn delete_favorite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ResourceError> {
    if !state
        .favorites
        .delete(id)
        .await
        .map_err(|e| ResourceError::from_store(ENTITY, e))?
    {
        return Err(ResourceError::NotFound { entity: ENTITY, id });
    }

    info!(favorite_id = id, "Favorite deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::create_test_state;

    const UNUSED_UPSTREAM: &str = "http://127.0.0.1:9";

    #[tokio::test]
    async fn test_list_favorites() {
        let state = create_test_state(UNUSED_UPSTREAM).await;
        state.favorites.insert(&Favorite::new(1, "City1", 1)).await.unwrap();
        state.favorites.insert(&Favorite::new(2, "City2", 2)).await.unwrap();

        let Json(favorites) = list_favorites(State(state)).await.unwrap();

        assert_eq!(favorites.len(), 2);
    }

    #[tokio::test]
    async fn test_list_favorites_empty() {
        let state = create_test_state(UNUSED_UPSTREAM).await;

        let Json(favorites) = list_favorites(State(state)).await.unwrap();

        assert!(favorites.is_empty());
    }

    #[tokio::test]
    async fn test_get_favorite_with_valid_id() {
        let state = create_test_state(UNUSED_UPSTREAM).await;
        state.favorites.insert(&Favorite::new(100, "City1", 1)).await.unwrap();

        let Json(favorite) = get_favorite(State(state), Path(100)).await.unwrap();

        assert_eq!(favorite.id, 100);
        assert_eq!(favorite.city, "City1");
    }

    #[tokio::test]
    async fn test_get_favorite_with_invalid_id() {
        let state = create_test_state(UNUSED_UPSTREAM).await;

        let response = get_favorite(State(state), Path(100))
            .await
            .unwrap_err()
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_favorite() {
        let state = create_test_state(UNUSED_UPSTREAM).await;
        let favorite = Favorite::new(1, "NewCity", 1);

        let response = create_favorite(State(state.clone()), Ok(Json(favorite.clone())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/favorites/1");
        assert_eq!(state.favorites.get(1).await.unwrap(), Some(favorite));
    }

    #[tokio::test]
    async fn test_update_favorite() {
        let state = create_test_state(UNUSED_UPSTREAM).await;
        state.favorites.insert(&Favorite::new(1, "OriginalCity", 1)).await.unwrap();

        let status = update_favorite(
            State(state.clone()),
            Path(1),
            Ok(Json(Favorite::new(1, "UpdatedCity", 1))),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(state.favorites.get(1).await.unwrap().unwrap().city, "UpdatedCity");
    }

    #[tokio::test]
    async fn test_update_favorite_with_mismatched_id() {
        let state = create_test_state(UNUSED_UPSTREAM).await;

        let response = update_favorite(State(state), Path(2), Ok(Json(Favorite::new(1, "City", 1))))
            .await
            .unwrap_err()
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_favorite_with_non_existing_id() {
        let state = create_test_state(UNUSED_UPSTREAM).await;

        let response = update_favorite(State(state), Path(1), Ok(Json(Favorite::new(1, "UpdatedCity", 1))))
            .await
            .unwrap_err()
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_favorite() {
        let state = create_test_state(UNUSED_UPSTREAM).await;
        state.favorites.insert(&Favorite::new(1, "City1", 1)).await.unwrap();

        let status = delete_favorite(State(state.clone()), Path(1)).await.unwrap();

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(state.favorites.get(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_favorite_with_non_existing_id() {
        let state = create_test_state(UNUSED_UPSTREAM).await;

        let response = delete_favorite(State(state), Path(1))
            .await
            .unwrap_err()
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_favorite_with_wrong_type_is_bad_request() {
        use crate::core::routes::build_router;
        use axum::body::Body;
        use axum::http::Request;
        use http_body_util::BodyExt;
        use tower::ServiceExt;

        let state = create_test_state(UNUSED_UPSTREAM).await;
        state.favorites.insert(&Favorite::new(1, "City", 1)).await.unwrap();
        let request = Request::builder()
            .method("PUT")
            .uri("/favorites/1")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"id":"one"}"#))
            .unwrap();

        let response = build_router(state.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(state.favorites.get(1).await.unwrap().unwrap().city, "City");
    }
}
