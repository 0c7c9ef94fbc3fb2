//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    domain::{RoomId, RoomPassword, ValueObjectError},
    infrastructure::dto::http::{
        ErrorResponseDto, HistoryRecordDto, MessageResponseDto, RoomCredentialsDto,
    },
    ui::state::AppState,
    usecase::{CreateRoomError, GetHistoryError, JoinRoomError},
};

/// Error response of the HTTP API: a status code and `{"detail": "..."}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InvalidInput(String),
    /// Request body missing, not JSON, or missing fields; keeps the
    /// extractor's status code
    MalformedBody { status: StatusCode, detail: String },
    AlreadyExists,
    Unauthorized,
    StoreUnavailable,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::AlreadyExists => StatusCode::BAD_REQUEST,
            ApiError::MalformedBody { status, .. } => *status,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn detail(&self) -> String {
        match self {
            ApiError::InvalidInput(reason) => reason.clone(),
            ApiError::MalformedBody { detail, .. } => detail.clone(),
            ApiError::AlreadyExists => "Room already exists".to_string(),
            ApiError::Unauthorized => "Invalid Room ID or Password".to_string(),
            ApiError::StoreUnavailable => "Service temporarily unavailable".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponseDto {
            detail: self.detail(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<ValueObjectError> for ApiError {
    fn from(e: ValueObjectError) -> Self {
        ApiError::InvalidInput(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<CreateRoomError> for ApiError {
    fn from(e: CreateRoomError) -> Self {
        match e {
            CreateRoomError::AlreadyExists(_) => ApiError::AlreadyExists,
            CreateRoomError::StoreUnavailable(_) => ApiError::StoreUnavailable,
        }
    }
}

impl From<JoinRoomError> for ApiError {
    fn from(e: JoinRoomError) -> Self {
        match e {
            JoinRoomError::Unauthorized => ApiError::Unauthorized,
            JoinRoomError::StoreUnavailable(_) => ApiError::StoreUnavailable,
        }
    }
}

impl From<GetHistoryError> for ApiError {
    fn from(e: GetHistoryError) -> Self {
        match e {
            GetHistoryError::StoreUnavailable(_) => ApiError::StoreUnavailable,
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `POST /create_room`
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RoomCredentialsDto>, JsonRejection>,
) -> Result<Json<MessageResponseDto>, ApiError> {
    let Json(body) = body?;
    // DTO から Domain Model への変換
    let room_id = RoomId::try_from(body.room_id)?;
    let password = RoomPassword::try_from(body.password)?;

    state
        .create_room_usecase
        .execute(room_id.clone(), password)
        .await?;

    Ok(Json(MessageResponseDto {
        message: format!("Room {} created successfully", room_id),
    }))
}

/// `POST /join_room`
pub async fn join_room(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RoomCredentialsDto>, JsonRejection>,
) -> Result<Json<MessageResponseDto>, ApiError> {
    let Json(body) = body?;
    let room_id = RoomId::try_from(body.room_id)?;
    let password = RoomPassword::try_from(body.password)?;

    state
        .join_room_usecase
        .execute(room_id.clone(), password)
        .await?;

    Ok(Json(MessageResponseDto {
        message: format!("Joined room {} successfully", room_id),
    }))
}

/// `GET /history/{room_id}`
///
/// Unknown rooms return an empty list.
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<Vec<HistoryRecordDto>>, ApiError> {
    let room_id = RoomId::try_from(room_id)?;

    let records = state.get_history_usecase.execute(room_id).await?;

    // Domain Model から DTO への変換
    Ok(Json(records.into_iter().map(HistoryRecordDto::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequest;

    async fn read(response: Response) -> (StatusCode, ErrorResponseDto) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_already_exists_is_400() {
        // テスト項目: AlreadyExists は 400 {"detail": "Room already exists"}
        // given (前提条件):
        let error = ApiError::from(CreateRoomError::AlreadyExists("r1".to_string()));

        // when (操作):
        let (status, body) = read(error.into_response()).await;

        // then (期待する結果):
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.detail, "Room already exists");
    }

    #[tokio::test]
    async fn test_unauthorized_is_401() {
        // テスト項目: Unauthorized は 401 {"detail": "Invalid Room ID or Password"}
        // given (前提条件):
        let error = ApiError::from(JoinRoomError::Unauthorized);

        // when (操作):
        let (status, body) = read(error.into_response()).await;

        // then (期待する結果):
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.detail, "Invalid Room ID or Password");
    }

    #[tokio::test]
    async fn test_store_unavailable_is_503_without_internals() {
        // テスト項目: Store 障害は 503 になり、内部のエラー文言は返さない
        // given (前提条件):
        let error = ApiError::from(GetHistoryError::StoreUnavailable(
            "database is locked".to_string(),
        ));

        // when (操作):
        let (status, body) = read(error.into_response()).await;

        // then (期待する結果):
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!body.detail.contains("database"));
    }

    #[tokio::test]
    async fn test_invalid_input_is_400() {
        // テスト項目: 値オブジェクトの検証エラーは 400 になり、理由が detail に入る
        // given (前提条件):
        let error = ApiError::from(ValueObjectError::ContainsSlash("room_id"));

        // when (操作):
        let (status, body) = read(error.into_response()).await;

        // then (期待する結果):
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.detail, "room_id must not contain '/'");
    }

    #[tokio::test]
    async fn test_json_rejection_keeps_status_and_uses_detail_body() {
        // テスト項目: JSON の抽出エラーも {"detail": ...} 形式になり、ステータスは抽出器のものを保つ
        // given (前提条件):
        let request = axum::http::Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap();
        let rejection = Json::<RoomCredentialsDto>::from_request(request, &())
            .await
            .unwrap_err();

        // when (操作):
        let (status, body) = read(ApiError::from(rejection).into_response()).await;

        // then (期待する結果):
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.detail.is_empty());
    }
}
