//! Integration tests: a real server on an ephemeral port driven by WebSocket and HTTP clients.

use std::{path::PathBuf, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use syncroom_server::{
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository},
    ui::{AppState, Server},
};
use syncroom_shared::time::SystemClock;
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

const RECV_TIMEOUT: Duration = Duration::from_secs(3);
const SILENCE_TIMEOUT: Duration = Duration::from_millis(300);

/// Server running in a background task for the duration of a test
struct TestServer {
    addr: std::net::SocketAddr,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn start(static_dir: PathBuf) -> Self {
        let state = AppState::new(
            Arc::new(InMemoryRoomRepository::new()),
            Arc::new(WebSocketMessagePusher::new()),
            Arc::new(SystemClock),
        );
        let app = Server::new(state, static_dir).router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self { addr, handle }
    }

    fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn connect(&self) -> WsClient {
        let (client, _) = connect_async(self.ws_url())
            .await
            .expect("Failed to connect WebSocket client");
        client
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn empty_static_dir() -> PathBuf {
    std::env::temp_dir().join(format!("syncroom-test-{}", uuid::Uuid::new_v4()))
}

async fn send_event(client: &mut WsClient, event: &str, data: Value) {
    let frame = json!({ "event": event, "data": data }).to_string();
    client
        .send(Message::Text(frame.into()))
        .await
        .expect("Failed to send frame");
}

/// Wait for the next text frame and decode it as an `{event, data}` envelope
async fn recv_event(client: &mut WsClient) -> (String, Value) {
    loop {
        let msg = tokio::time::timeout(RECV_TIMEOUT, client.next())
            .await
            .expect("Timed out waiting for an event")
            .expect("Connection closed")
            .expect("WebSocket error");
        if let Message::Text(text) = msg {
            let mut envelope: Value = serde_json::from_str(text.as_str()).expect("Invalid JSON");
            let event = envelope["event"]
                .as_str()
                .expect("Missing event name")
                .to_string();
            return (event, envelope["data"].take());
        }
    }
}

/// Assert that no text frame arrives within a short window
async fn assert_silent(client: &mut WsClient) {
    if let Ok(Some(Ok(Message::Text(text)))) =
        tokio::time::timeout(SILENCE_TIMEOUT, client.next()).await
    {
        panic!("Unexpected event: {}", text.as_str());
    }
}

async fn join(client: &mut WsClient, room_id: &str, username: &str) -> Value {
    send_event(
        client,
        "join-room",
        json!({ "roomId": room_id, "username": username }),
    )
    .await;
    let (event, data) = recv_event(client).await;
    assert_eq!(event, "room-state");
    data
}

async fn get_json(url: &str) -> (reqwest::StatusCode, Value) {
    let response = reqwest::get(url).await.expect("HTTP request failed");
    let status = response.status();
    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health_check() {
    // テスト項目: ヘルスチェックが 200 と {"status":"ok"} を返す
    // given (前提条件):
    let server = TestServer::start(empty_static_dir()).await;

    // when (操作):
    let (status, body) = get_json(&server.http_url("/api/health")).await;

    // then (期待する結果):
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_static_files_are_served_from_static_dir() {
    // テスト項目: API 以外のパスは静的ファイルディレクトリから配信される
    // given (前提条件):
    let static_dir = empty_static_dir();
    std::fs::create_dir_all(&static_dir).unwrap();
    std::fs::write(static_dir.join("index.html"), "<h1>SyncRoom</h1>").unwrap();
    let server = TestServer::start(static_dir.clone()).await;

    // when (操作):
    let response = reqwest::get(server.http_url("/index.html")).await.unwrap();
    let missing = reqwest::get(server.http_url("/missing.js")).await.unwrap();

    // then (期待する結果):
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "<h1>SyncRoom</h1>");
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);

    let _ = std::fs::remove_dir_all(static_dir);
}

#[tokio::test]
async fn test_first_joiner_receives_default_room_state() {
    // テスト項目: 最初の参加者は空のルーム状態（デフォルト再生状態）を受け取る
    // given (前提条件):
    let server = TestServer::start(empty_static_dir()).await;
    let mut alice = server.connect().await;

    // when (操作):
    let state = join(&mut alice, "r1", "alice").await;

    // then (期待する結果):
    assert_eq!(
        state,
        json!({
            "users": [],
            "currentVideo": null,
            "playbackState": {
                "isPlaying": false,
                "currentTime": 0.0,
                "playbackRate": 1.0,
                "quality": "auto"
            }
        })
    );
}

#[tokio::test]
async fn test_watch_party_scenario() {
    // テスト項目: 参加・再生同期・動画変更・チャット・切断の一連の流れ
    // given (前提条件):
    let server = TestServer::start(empty_static_dir()).await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    join(&mut alice, "r1", "alice").await;

    // when (操作): bob が参加する
    let bob_state = join(&mut bob, "r1", "bob").await;

    // then (期待する結果):
    let (event, data) = recv_event(&mut alice).await;
    assert_eq!(event, "user-connected");
    assert_eq!(data, json!({ "username": "bob" }));
    let users = bob_state["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["username"], "alice");
    let alice_id = users[0]["id"].as_str().unwrap().to_string();

    // when (操作): alice が再生位置を共有する
    let control = json!({ "isPlaying": true, "currentTime": 42.5, "clientHint": "seek" });
    send_event(&mut alice, "playback-control", control.clone()).await;

    // then (期待する結果): ペイロードはそのまま転送され、送信者には返らない
    let (event, data) = recv_event(&mut bob).await;
    assert_eq!(event, "playback-update");
    assert_eq!(data, control);
    assert_silent(&mut alice).await;

    // when (操作): bob が動画を変更する
    send_event(&mut bob, "video-change", json!({ "videoId": "dQw4w9WgXcQ" })).await;

    // then (期待する結果):
    let (event, data) = recv_event(&mut alice).await;
    assert_eq!(event, "video-updated");
    assert_eq!(data, json!({ "videoId": "dQw4w9WgXcQ" }));

    let (status, detail) = get_json(&server.http_url("/api/rooms/r1")).await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(detail["currentVideo"], "dQw4w9WgXcQ");
    assert_eq!(detail["playbackState"]["currentTime"], 0.0);
    assert_eq!(detail["playbackState"]["isPlaying"], true);

    // when (操作): alice がチャットを送る
    send_event(&mut alice, "chat-message", json!({ "message": "hi" })).await;

    // then (期待する結果):
    let (event, data) = recv_event(&mut bob).await;
    assert_eq!(event, "chat-message");
    assert_eq!(data["username"], "alice");
    assert_eq!(data["message"], "hi");
    assert!(data["timestamp"].as_str().unwrap().ends_with('Z'));
    assert_silent(&mut alice).await;

    // when (操作): bob が切断する
    let bob_id = detail["participants"][1]["id"].as_str().unwrap().to_string();
    assert_eq!(detail["participants"][0]["id"], alice_id.as_str());
    bob.close(None).await.unwrap();

    // then (期待する結果):
    let (event, data) = recv_event(&mut alice).await;
    assert_eq!(event, "user-disconnected");
    assert_eq!(data, json!({ "username": "bob", "id": bob_id }));

    let (_, rooms) = get_json(&server.http_url("/api/rooms")).await;
    assert_eq!(rooms[0]["participants"], json!(["alice"]));
}

#[tokio::test]
async fn test_empty_room_id_and_username_are_valid() {
    // テスト項目: 空文字列のルーム ID やユーザー名でも参加でき、ルーム状態が届く
    // given (前提条件):
    let server = TestServer::start(empty_static_dir()).await;
    let mut first = server.connect().await;
    let mut second = server.connect().await;

    // when (操作):
    let state = join(&mut first, "", "").await;
    join(&mut second, "", "bob").await;

    // then (期待する結果):
    assert_eq!(state["users"], json!([]));
    let (event, data) = recv_event(&mut first).await;
    assert_eq!(event, "user-connected");
    assert_eq!(data, json!({ "username": "bob" }));
    let (_, rooms) = get_json(&server.http_url("/api/rooms")).await;
    assert_eq!(rooms[0]["id"], "");
    assert_eq!(rooms[0]["participants"], json!(["", "bob"]));
}

#[tokio::test]
async fn test_playback_control_with_null_or_ill_typed_fields_is_forwarded() {
    // テスト項目: isPlaying が null でも、型の違うフィールドがあっても、ペイロードはそのまま転送される
    // given (前提条件):
    let server = TestServer::start(empty_static_dir()).await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    join(&mut alice, "r1", "alice").await;
    join(&mut bob, "r1", "bob").await;
    recv_event(&mut alice).await; // user-connected
    let control = json!({ "isPlaying": null, "currentTime": 5, "quality": 720 });

    // when (操作):
    send_event(&mut alice, "playback-control", control.clone()).await;

    // then (期待する結果):
    let (event, data) = recv_event(&mut bob).await;
    assert_eq!(event, "playback-update");
    assert_eq!(data, control);
    let (_, detail) = get_json(&server.http_url("/api/rooms/r1")).await;
    assert_eq!(detail["playbackState"]["isPlaying"], false);
    assert_eq!(detail["playbackState"]["currentTime"], 5.0);
    assert_eq!(detail["playbackState"]["quality"], "auto");
}

#[tokio::test]
async fn test_voice_call_signaling() {
    // テスト項目: start-voice で発信先を受け取り、offer/answer/candidate が相手に中継される
    // given (前提条件):
    let server = TestServer::start(empty_static_dir()).await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    join(&mut alice, "r1", "alice").await;
    let bob_state = join(&mut bob, "r1", "bob").await;
    recv_event(&mut alice).await; // user-connected
    let alice_id = bob_state["users"][0]["id"].as_str().unwrap().to_string();

    // when (操作): alice が通話開始を要求する
    send_event(&mut alice, "start-voice", json!({ "roomId": "r1" })).await;

    // then (期待する結果): bob への発信指示が alice にのみ届く
    let (event, data) = recv_event(&mut alice).await;
    assert_eq!(event, "voice-offer");
    let bob_id = data["to"].as_str().unwrap().to_string();
    assert_silent(&mut bob).await;

    // when (操作): offer を送る
    let offer = json!({ "type": "offer", "sdp": "v=0" });
    send_event(
        &mut alice,
        "voice-offer",
        json!({ "to": bob_id, "offer": offer }),
    )
    .await;

    // then (期待する結果):
    let (event, data) = recv_event(&mut bob).await;
    assert_eq!(event, "voice-offer");
    assert_eq!(data, json!({ "from": alice_id, "offer": offer }));

    // when (操作): answer と candidate を返す
    let answer = json!({ "type": "answer", "sdp": "v=0" });
    let candidate = json!({ "candidate": "candidate:1 1 UDP 2122260223 10.0.0.1 54400 typ host" });
    send_event(&mut bob, "voice-answer", json!({ "to": alice_id, "answer": answer })).await;
    send_event(
        &mut bob,
        "voice-candidate",
        json!({ "to": alice_id, "candidate": candidate }),
    )
    .await;

    // then (期待する結果): 送信順に届く
    let (event, data) = recv_event(&mut alice).await;
    assert_eq!(event, "voice-answer");
    assert_eq!(data, json!({ "from": bob_id, "answer": answer }));
    let (event, data) = recv_event(&mut alice).await;
    assert_eq!(event, "voice-candidate");
    assert_eq!(data, json!({ "from": bob_id, "candidate": candidate }));
}

#[tokio::test]
async fn test_events_before_join_and_malformed_frames_are_ignored() {
    // テスト項目: 未参加の接続からのイベントや不正なフレームは無視され、接続は維持される
    // given (前提条件):
    let server = TestServer::start(empty_static_dir()).await;
    let mut alice = server.connect().await;
    let mut stranger = server.connect().await;
    join(&mut alice, "r1", "alice").await;

    // when (操作):
    send_event(&mut stranger, "chat-message", json!({ "message": "hello?" })).await;
    send_event(&mut stranger, "playback-control", json!({ "isPlaying": true })).await;
    stranger
        .send(Message::Text("not json".into()))
        .await
        .unwrap();
    send_event(&mut stranger, "unknown-event", json!({})).await;
    send_event(&mut stranger, "voice-offer", json!({ "to": "nobody", "offer": {} })).await;

    // then (期待する結果):
    assert_silent(&mut alice).await;

    // 同じ接続でその後参加できる
    let state = join(&mut stranger, "r1", "stranger").await;
    assert_eq!(state["users"][0]["username"], "alice");
    let (event, _) = recv_event(&mut alice).await;
    assert_eq!(event, "user-connected");
}

#[tokio::test]
async fn test_room_is_deleted_after_last_participant_leaves() {
    // テスト項目: 最後の参加者が切断するとルームが削除される
    // given (前提条件):
    let server = TestServer::start(empty_static_dir()).await;
    let mut alice = server.connect().await;
    join(&mut alice, "r1", "alice").await;
    let (_, rooms) = get_json(&server.http_url("/api/rooms")).await;
    assert_eq!(rooms.as_array().unwrap().len(), 1);

    // when (操作):
    alice.close(None).await.unwrap();

    // then (期待する結果): 切断処理は非同期のため、削除されるまで待つ
    let mut deleted = false;
    for _ in 0..30 {
        let (status, _) = get_json(&server.http_url("/api/rooms/r1")).await;
        if status == reqwest::StatusCode::NOT_FOUND {
            deleted = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(deleted, "room r1 should be deleted");
    let (_, rooms) = get_json(&server.http_url("/api/rooms")).await;
    assert_eq!(rooms, json!([]));
}

#[tokio::test]
async fn test_rejoining_with_a_new_connection_gets_fresh_room() {
    // テスト項目: 削除されたルームに再参加すると新しいデフォルト状態のルームが作られる
    // given (前提条件):
    let server = TestServer::start(empty_static_dir()).await;
    let mut alice = server.connect().await;
    join(&mut alice, "r1", "alice").await;
    send_event(&mut alice, "video-change", json!({ "videoId": "abc" })).await;
    alice.close(None).await.unwrap();
    for _ in 0..30 {
        let (status, _) = get_json(&server.http_url("/api/rooms/r1")).await;
        if status == reqwest::StatusCode::NOT_FOUND {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    // when (操作):
    let mut bob = server.connect().await;
    let state = join(&mut bob, "r1", "bob").await;

    // then (期待する結果):
    assert_eq!(state["currentVideo"], Value::Null);
    assert_eq!(state["playbackState"]["isPlaying"], false);
}
