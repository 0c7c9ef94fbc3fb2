//! In-memory [`ConnectionRegistry`] with per-room locking.
//!
//! ## Locking
//!
//! Two levels: an outer `RwLock` over the `room_id → set` map and one
//! `Mutex` per room set. Lock order is always outer then inner.
//!
//! - `register` / `snapshot` / `deregister` take the outer lock for reading,
//!   so rooms never contend with each other.
//! - Removing an empty set takes the outer lock for writing and re-checks
//!   emptiness. Because `register` holds the read lock while it inserts, a
//!   set can never be dropped from the map while someone is inserting into
//!   it.
//!
//! No lock is held across an `.await`; fan-out sends happen on the snapshot.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::domain::{Connection, ConnectionId, ConnectionRegistry, RoomId};

type RoomSet = Arc<Mutex<HashMap<ConnectionId, Connection>>>;

/// Per-room locked registry of live connections
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    rooms: RwLock<HashMap<RoomId, RoomSet>>,
}

// A panic while holding one of these locks cannot leave the maps
// half-updated (every mutation is a single insert/remove), so poisoning is
// safe to ignore.
fn lock_set(set: &RoomSet) -> MutexGuard<'_, HashMap<ConnectionId, Connection>> {
    set.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_rooms(&self) -> RwLockReadGuard<'_, HashMap<RoomId, RoomSet>> {
        self.rooms.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_rooms(&self) -> RwLockWriteGuard<'_, HashMap<RoomId, RoomSet>> {
        self.rooms.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn remove_room_if_empty(&self, room_id: &RoomId) {
        let mut rooms = self.write_rooms();
        let is_empty = rooms
            .get(room_id)
            .is_some_and(|set| lock_set(set).is_empty());
        if is_empty {
            rooms.remove(room_id);
            tracing::debug!("Room '{}' has no connections left, set dropped", room_id);
        }
    }
}

impl ConnectionRegistry for InMemoryConnectionRegistry {
    fn register(&self, connection: Connection) {
        let room_id = connection.room_id().clone();
        let connection_id = connection.id();

        {
            let rooms = self.read_rooms();
            if let Some(set) = rooms.get(&room_id) {
                lock_set(set).insert(connection_id, connection);
                tracing::debug!(
                    "Connection '{}' registered to room '{}'",
                    connection_id,
                    room_id
                );
                return;
            }
        }

        // First connection of the room: create the set under the write lock.
        let mut rooms = self.write_rooms();
        let set = rooms.entry(room_id.clone()).or_default();
        lock_set(set).insert(connection_id, connection);
        tracing::debug!(
            "Connection '{}' registered to new room set '{}'",
            connection_id,
            room_id
        );
    }

    fn deregister(&self, room_id: &RoomId, connection_id: &ConnectionId) -> bool {
        let (removed, now_empty) = {
            let rooms = self.read_rooms();
            let Some(set) = rooms.get(room_id) else {
                return false;
            };
            let mut set = lock_set(set);
            let removed = set.remove(connection_id).is_some();
            (removed, set.is_empty())
        };

        if removed {
            tracing::debug!(
                "Connection '{}' deregistered from room '{}'",
                connection_id,
                room_id
            );
        }
        if now_empty {
            self.remove_room_if_empty(room_id);
        }
        removed
    }

    fn snapshot(&self, room_id: &RoomId) -> Vec<Connection> {
        let rooms = self.read_rooms();
        rooms
            .get(room_id)
            .map(|set| lock_set(set).values().cloned().collect())
            .unwrap_or_default()
    }

    fn count(&self, room_id: &RoomId) -> usize {
        let rooms = self.read_rooms();
        rooms.get(room_id).map_or(0, |set| lock_set(set).len())
    }

    fn room_count(&self) -> usize {
        self.read_rooms().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Nickname, OUTBOUND_QUEUE_CAPACITY, OutboundReceiver, Participant};
    use std::collections::HashSet;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - register / deregister / snapshot の基本動作
    // - deregister の冪等性
    // - 空になった room set の回収と再作成
    // - 並行アクセス時に set が壊れないこと
    //
    // 【なぜこのテストが必要か】
    // - 全ての接続ハンドラから共有される唯一の可変状態
    // - fan-out の正しさ（送信者除外・幽霊エントリなし）はここに依存する
    // ========================================

    fn room(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    fn connection(room_id: &str, nickname: &str) -> (Connection, OutboundReceiver) {
        let (tx, rx) = mpsc::channel(OUTBOUND_QUEUE_CAPACITY);
        let participant = Participant::new(
            room(room_id),
            Nickname::new(nickname.to_string()).unwrap(),
        );
        (Connection::new(participant, tx), rx)
    }

    #[test]
    fn test_register_creates_room_set_lazily() {
        // テスト項目: 最初の register で room set が作られる
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (alice, _rx) = connection("r1", "alice");

        // when (操作):
        registry.register(alice.clone());

        // then (期待する結果):
        assert_eq!(registry.room_count(), 1);
        assert_eq!(registry.count(&room("r1")), 1);
        let snapshot = registry.snapshot(&room("r1"));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id(), alice.id());
    }

    #[test]
    fn test_same_nickname_registers_twice() {
        // テスト項目: nickname が重複しても別の接続として登録される
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (first, _rx1) = connection("r1", "alice");
        let (second, _rx2) = connection("r1", "alice");

        // when (操作):
        registry.register(first);
        registry.register(second);

        // then (期待する結果):
        assert_eq!(registry.count(&room("r1")), 2);
    }

    #[test]
    fn test_rooms_are_isolated() {
        // テスト項目: 別の room の接続は snapshot に含まれない
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (alice, _rx1) = connection("r1", "alice");
        let (bob, _rx2) = connection("r2", "bob");
        registry.register(alice.clone());
        registry.register(bob);

        // when (操作):
        let snapshot = registry.snapshot(&room("r1"));

        // then (期待する結果):
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id(), alice.id());
        assert_eq!(registry.room_count(), 2);
    }

    #[test]
    fn test_deregister_removes_connection_and_empty_set() {
        // テスト項目: 最後の接続を削除すると room set も回収される
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (alice, _rx) = connection("r1", "alice");
        registry.register(alice.clone());

        // when (操作):
        let removed = registry.deregister(&room("r1"), &alice.id());

        // then (期待する結果):
        assert!(removed);
        assert_eq!(registry.count(&room("r1")), 0);
        assert_eq!(registry.room_count(), 0);
        assert!(registry.snapshot(&room("r1")).is_empty());
    }

    #[test]
    fn test_deregister_unknown_connection_is_noop() {
        // テスト項目: 登録されていない接続の deregister は何もしない（冪等性）
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (alice, _rx1) = connection("r1", "alice");
        let (stranger, _rx2) = connection("r1", "mallory");
        registry.register(alice);

        // when (操作):
        let unknown_in_known_room = registry.deregister(&room("r1"), &stranger.id());
        let unknown_room = registry.deregister(&room("nowhere"), &stranger.id());

        // then (期待する結果):
        assert!(!unknown_in_known_room);
        assert!(!unknown_room);
        assert_eq!(registry.count(&room("r1")), 1);
    }

    #[test]
    fn test_deregister_twice_is_noop() {
        // テスト項目: 同じ接続を二度 deregister しても二回目は何もしない
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (alice, _rx) = connection("r1", "alice");
        registry.register(alice.clone());

        // when (操作):
        let first = registry.deregister(&room("r1"), &alice.id());
        let second = registry.deregister(&room("r1"), &alice.id());

        // then (期待する結果):
        assert!(first);
        assert!(!second);
    }

    #[test]
    fn test_register_after_set_collected() {
        // テスト項目: 回収済みの room に再び register できる
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (alice, _rx1) = connection("r1", "alice");
        registry.register(alice.clone());
        registry.deregister(&room("r1"), &alice.id());

        // when (操作):
        let (bob, _rx2) = connection("r1", "bob");
        registry.register(bob.clone());

        // then (期待する結果):
        let snapshot = registry.snapshot(&room("r1"));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id(), bob.id());
    }

    #[test]
    fn test_snapshot_is_point_in_time_copy() {
        // テスト項目: snapshot 取得後の変更は取得済み snapshot に影響しない
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (alice, _rx1) = connection("r1", "alice");
        registry.register(alice.clone());
        let snapshot = registry.snapshot(&room("r1"));

        // when (操作):
        let (bob, _rx2) = connection("r1", "bob");
        registry.register(bob);
        registry.deregister(&room("r1"), &alice.id());

        // then (期待する結果):
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id(), alice.id());
        assert_eq!(registry.count(&room("r1")), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_register_deregister_snapshot() {
        // テスト項目: 同じ room への並行 register / deregister / snapshot で set が壊れない
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let mut stayers = Vec::new();
        for i in 0..16 {
            let (conn, rx) = connection("busy", &format!("stayer{}", i));
            registry.register(conn.clone());
            stayers.push((conn, rx));
        }
        let stayer_ids: HashSet<ConnectionId> = stayers.iter().map(|(c, _)| c.id()).collect();

        // when (操作): 64 タスクが登録・snapshot・解除を繰り返す
        let mut handles = Vec::new();
        for task in 0..64 {
            let registry = registry.clone();
            let stayer_ids = stayer_ids.clone();
            handles.push(tokio::spawn(async move {
                for round in 0..100 {
                    let (conn, _rx) = connection("busy", &format!("churn{}-{}", task, round));
                    let id = conn.id();
                    registry.register(conn);

                    let snapshot = registry.snapshot(&room("busy"));
                    let ids: HashSet<ConnectionId> = snapshot.iter().map(Connection::id).collect();
                    // 重複エントリなし
                    assert_eq!(ids.len(), snapshot.len());
                    // 自分自身と常駐接続は必ず含まれる
                    assert!(ids.contains(&id));
                    assert!(stayer_ids.is_subset(&ids));
                    // 全て正しい room に属する
                    assert!(snapshot.iter().all(|c| c.room_id().as_str() == "busy"));

                    assert!(registry.deregister(&room("busy"), &id));
                    assert!(!registry.deregister(&room("busy"), &id));
                    tokio::task::yield_now().await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // then (期待する結果): 幽霊エントリは残らない
        let remaining: HashSet<ConnectionId> = registry
            .snapshot(&room("busy"))
            .iter()
            .map(Connection::id)
            .collect();
        assert_eq!(remaining, stayer_ids);
        assert_eq!(registry.room_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_churn_on_emptying_room() {
        // テスト項目: set の回収と register が競合しても登録が失われない
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());

        // when (操作): room が空になる瞬間を何度も作りながら並行に出入りする
        let mut handles = Vec::new();
        for task in 0..32 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                for round in 0..200 {
                    let (conn, _rx) = connection("flaky", &format!("u{}-{}", task, round));
                    let id = conn.id();
                    registry.register(conn);
                    // 登録直後は必ず見える
                    assert!(registry
                        .snapshot(&room("flaky"))
                        .iter()
                        .any(|c| c.id() == id));
                    assert!(registry.deregister(&room("flaky"), &id));
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // then (期待する結果):
        assert_eq!(registry.count(&room("flaky")), 0);
        assert_eq!(registry.room_count(), 0);
    }
}
