//! In-process test server shared by the integration tests.

#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use agora_server::{
    domain::{ConnectionRegistry, RoomId},
    infrastructure::{
        registry::InMemoryConnectionRegistry,
        repository::{InMemoryHistoryStore, InMemoryRoomStore},
    },
    ui::Server,
    usecase::{
        ConnectParticipantUseCase, CreateRoomUseCase, DisconnectParticipantUseCase,
        GetHistoryUseCase, JoinRoomUseCase, SendMessageUseCase,
    },
};
use futures_util::{SinkExt, StreamExt};
use tokio::{net::TcpStream, sync::oneshot};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type TestSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Server bound to an ephemeral port, shut down on drop
pub struct TestServer {
    pub port: u16,
    pub registry: Arc<InMemoryConnectionRegistry>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        let room_store = Arc::new(InMemoryRoomStore::new());
        let history_store = Arc::new(InMemoryHistoryStore::new());
        let registry = Arc::new(InMemoryConnectionRegistry::new());

        let disconnect = Arc::new(DisconnectParticipantUseCase::new(registry.clone()));
        let server = Server::new(
            Arc::new(CreateRoomUseCase::new(room_store.clone())),
            Arc::new(JoinRoomUseCase::new(room_store)),
            Arc::new(GetHistoryUseCase::new(history_store.clone())),
            Arc::new(ConnectParticipantUseCase::new(registry.clone(), disconnect)),
            Arc::new(SendMessageUseCase::new(
                history_store,
                None,
                registry.clone(),
            )),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let port = listener.local_addr().unwrap().port();

        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let shutdown = async {
                let _ = rx.await;
            };
            if let Err(e) = server.serve(listener, shutdown).await {
                eprintln!("test server error: {e}");
            }
        });

        Self {
            port,
            registry,
            shutdown: Some(tx),
        }
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }

    pub fn ws_url(&self, room_id: &str, nickname: &str) -> String {
        format!("ws://127.0.0.1:{}/ws/{}/{}", self.port, room_id, nickname)
    }

    pub async fn connect(&self, room_id: &str, nickname: &str) -> TestSocket {
        let (socket, _) = connect_async(self.ws_url(room_id, nickname))
            .await
            .expect("Failed to connect");
        socket
    }

    /// Wait until the registry holds `expected` connections for the room.
    pub async fn wait_for_count(&self, room_id: &str, expected: usize) {
        let room_id = RoomId::new(room_id.to_string()).unwrap();
        for _ in 0..100 {
            if self.registry.count(&room_id) == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!(
            "room '{}' never reached {} connection(s), has {}",
            room_id,
            expected,
            self.registry.count(&room_id)
        );
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn send_text(socket: &mut TestSocket, text: &str) {
    socket
        .send(Message::Text(text.to_string().into()))
        .await
        .expect("Failed to send");
}

/// Next text frame, or `None` if nothing arrives within `timeout`.
pub async fn recv_text(socket: &mut TestSocket, timeout: Duration) -> Option<String> {
    loop {
        match tokio::time::timeout(timeout, socket.next()).await {
            Ok(Some(Ok(Message::Text(text)))) => return Some(text.as_str().to_string()),
            Ok(Some(Ok(_))) => continue,
            _ => return None,
        }
    }
}
