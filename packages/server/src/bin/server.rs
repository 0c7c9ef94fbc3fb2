//! Multi-room chat relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin agora-server
//! cargo run --bin agora-server -- --host 0.0.0.0 --port 8000 \
//!     --database-url "sqlite://agora.db?mode=rwc" --archive-path archive.jsonl
//! ```

use std::sync::Arc;

use agora_server::{
    domain::{ArchiveStore, ConnectionRegistry, HistoryStore, RoomStore},
    infrastructure::{
        archive::JsonLinesArchive,
        registry::InMemoryConnectionRegistry,
        repository::{InMemoryHistoryStore, InMemoryRoomStore, SqliteDatabase},
    },
    ui::Server,
    usecase::{
        ConnectParticipantUseCase, CreateRoomUseCase, DisconnectParticipantUseCase,
        GetHistoryUseCase, JoinRoomUseCase, SendMessageUseCase,
    },
};
use agora_shared::logger::setup_logger;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "agora-server")]
#[command(about = "Multi-room chat relay with password-protected rooms", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8000")]
    port: u16,

    /// SQLite database URL; rooms and history are kept in memory when omitted
    #[arg(long, env = "AGORA_DATABASE_URL")]
    database_url: Option<String>,

    /// Append every message to this JSON Lines file
    #[arg(long, env = "AGORA_ARCHIVE_PATH")]
    archive_path: Option<String>,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. Stores
    // 2. Connection registry
    // 3. UseCases
    // 4. Server

    // 1. Create stores (SQLite or in-memory, plus optional archive)
    let (room_store, history_store): (Arc<dyn RoomStore>, Arc<dyn HistoryStore>) =
        match &args.database_url {
            Some(url) => match SqliteDatabase::connect(url).await {
                Ok(database) => {
                    tracing::info!("Using SQLite database '{}'", url);
                    let room_store: Arc<dyn RoomStore> = Arc::new(database.room_store());
                    let history_store: Arc<dyn HistoryStore> =
                        Arc::new(database.history_store());
                    (room_store, history_store)
                }
                Err(e) => {
                    tracing::error!("Failed to open database '{}': {}", url, e);
                    std::process::exit(1);
                }
            },
            None => {
                tracing::info!("Using in-memory stores; rooms and history are lost on exit");
                let room_store: Arc<dyn RoomStore> = Arc::new(InMemoryRoomStore::new());
                let history_store: Arc<dyn HistoryStore> = Arc::new(InMemoryHistoryStore::new());
                (room_store, history_store)
            }
        };

    let archive_store: Option<Arc<dyn ArchiveStore>> = match &args.archive_path {
        Some(path) => match JsonLinesArchive::open(path).await {
            Ok(archive) => {
                tracing::info!("Archiving messages to '{}'", path);
                let archive: Arc<dyn ArchiveStore> = Arc::new(archive);
                Some(archive)
            }
            Err(e) => {
                tracing::error!("Failed to open archive: {}", e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    // 2. Create connection registry
    let registry: Arc<dyn ConnectionRegistry> = Arc::new(InMemoryConnectionRegistry::new());

    // 3. Create UseCases
    let create_room_usecase = Arc::new(CreateRoomUseCase::new(room_store.clone()));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(room_store));
    let get_history_usecase = Arc::new(GetHistoryUseCase::new(history_store.clone()));
    let disconnect_participant_usecase =
        Arc::new(DisconnectParticipantUseCase::new(registry.clone()));
    let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(
        registry.clone(),
        disconnect_participant_usecase,
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        history_store,
        archive_store,
        registry,
    ));

    // 4. Create and run the server
    let server = Server::new(
        create_room_usecase,
        join_room_usecase,
        get_history_usecase,
        connect_participant_usecase,
        send_message_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
