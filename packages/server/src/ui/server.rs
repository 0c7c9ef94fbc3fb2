//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::usecase::{
    ConnectParticipantUseCase, CreateRoomUseCase, GetHistoryUseCase, JoinRoomUseCase,
    SendMessageUseCase,
};

use super::{
    handler::{create_room, get_history, health_check, join_room, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Multi-room chat relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     create_room_usecase,
///     join_room_usecase,
///     get_history_usecase,
///     connect_participant_usecase,
///     send_message_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 8000).await?;
/// ```
pub struct Server {
    app_state: Arc<AppState>,
}

impl Server {
    pub fn new(
        create_room_usecase: Arc<CreateRoomUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        get_history_usecase: Arc<GetHistoryUseCase>,
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
    ) -> Self {
        Self {
            app_state: Arc::new(AppState {
                create_room_usecase,
                join_room_usecase,
                get_history_usecase,
                connect_participant_usecase,
                send_message_usecase,
            }),
        }
    }

    /// Build the axum router with all routes and middleware.
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws/{room_id}/{nickname}", get(websocket_handler))
            // HTTP エンドポイント
            .route("/create_room", post(create_room))
            .route("/join_room", post(join_room))
            .route("/history/{room_id}", get(get_history))
            .route("/api/health", get(health_check))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.app_state.clone())
    }

    /// Run the server until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Connect to: ws://{}/ws/{{room_id}}/{{nickname}}", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(
        self,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!("Chat relay listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
