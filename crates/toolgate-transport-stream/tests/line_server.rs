//! End-to-end tests for the line transport over TCP and in-memory pipes.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use toolgate_rbac::{PolicyAuthorizer, RbacPolicy};
use toolgate_registry::{handler_fn, MemoryAuditSink, MemoryContextStore, ToolRegistry};
use toolgate_rpc::{CloseReason, Connection, Dispatcher};
use toolgate_transport_stream::{LineTransport, TcpServer};
use toolgate_types::{Role, ToolName, ToolSpec};

fn dispatcher() -> (Arc<Dispatcher>, Arc<MemoryAuditSink>) {
    let mut registry = ToolRegistry::new();
    registry.register(
        ToolSpec::new(ToolName::new("echo").expect("name"), "echo", Role::new("reader")),
        handler_fn(|args| async move { Ok(Value::Object(args)) }),
    );
    let audit = Arc::new(MemoryAuditSink::new());
    let dispatcher = Dispatcher::new(
        Arc::new(registry),
        Arc::new(PolicyAuthorizer::new(RbacPolicy::new().allow("reader", ["echo"]))),
        Arc::new(MemoryContextStore::new()),
        audit.clone(),
    );
    (Arc::new(dispatcher), audit)
}

fn call(id: u64, n: u64) -> String {
    json!({
        "version": "2.0",
        "id": id,
        "method": "tools.call",
        "params": {"name": "echo", "args": {"n": n}},
    })
    .to_string()
}

async fn start_server(max_frame_bytes: usize) -> (std::net::SocketAddr, Arc<MemoryAuditSink>) {
    let (dispatcher, audit) = dispatcher();
    let server = TcpServer::bind("127.0.0.1:0", dispatcher, max_frame_bytes)
        .await
        .expect("bind");
    let addr = server.local_addr().expect("addr");
    tokio::spawn(server.run());
    (addr, audit)
}

/// Sends `count` calls in sequence and checks each reply's id and payload.
async fn run_client(addr: std::net::SocketAddr, client: u64, count: u64) {
    let stream = TcpStream::connect(addr).await.expect("connect");
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    for n in 0..count {
        let id = client * 1000 + n;
        writer
            .write_all(format!("{}\n", call(id, n)).as_bytes())
            .await
            .expect("write");
        let line = lines.next_line().await.expect("read").expect("reply");
        let reply: Value = serde_json::from_str(&line).expect("json");
        assert_eq!(reply["id"], json!(id));
        assert_eq!(reply["result"], json!({"n": n}));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn two_connections_hundred_calls_each_audit_two_hundred() {
    let (addr, audit) = start_server(1024).await;

    let a = tokio::spawn(run_client(addr, 1, 100));
    let b = tokio::spawn(run_client(addr, 2, 100));
    a.await.expect("client a");
    b.await.expect("client b");

    let records = audit.records();
    assert_eq!(records.len(), 200);

    let ids: BTreeSet<u64> = records
        .iter()
        .map(|r| {
            let request: Value = serde_json::from_str(&r.request).expect("request json");
            assert_eq!(r.method, "tools.call");
            request["id"].as_u64().expect("numeric id")
        })
        .collect();
    let expected: BTreeSet<u64> = (1000..1100).chain(2000..2100).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn oversized_frame_closes_connection() {
    let (addr, audit) = start_server(64).await;
    let stream = TcpStream::connect(addr).await.expect("connect");
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    let big = format!("{}\n", "x".repeat(200));
    writer.write_all(big.as_bytes()).await.expect("write");

    // Server closes without replying (EOF or reset, depending on timing).
    let next = lines.next_line().await;
    assert!(matches!(next, Ok(None) | Err(_)), "unexpected reply: {next:?}");
    assert!(audit.is_empty());
}

#[tokio::test]
async fn garbage_gets_parse_error_and_connection_survives() {
    let (addr, _audit) = start_server(1024).await;
    let stream = TcpStream::connect(addr).await.expect("connect");
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    writer.write_all(b"not json\n").await.expect("write");
    let reply: Value =
        serde_json::from_str(&lines.next_line().await.expect("read").expect("line")).expect("json");
    assert_eq!(reply["id"], Value::Null);
    assert_eq!(reply["error"]["code"], json!(-32700));

    writer
        .write_all(format!("{}\n", call(9, 1)).as_bytes())
        .await
        .expect("write");
    let reply: Value =
        serde_json::from_str(&lines.next_line().await.expect("read").expect("line")).expect("json");
    assert_eq!(reply["id"], json!(9));
}

#[tokio::test]
async fn connection_over_duplex_pipe() {
    let (dispatcher, audit) = dispatcher();
    let (client, server) = tokio::io::duplex(4096);
    let (server_read, server_write) = tokio::io::split(server);
    let handle = tokio::spawn(async move {
        let io = LineTransport::new(server_read, server_write);
        Connection::new(io, dispatcher).run().await
    });

    let (client_read, mut client_write) = tokio::io::split(client);
    let mut lines = BufReader::new(client_read).lines();
    client_write
        .write_all(format!("\n{}\n", call(1, 5)).as_bytes())
        .await
        .expect("write");
    let line = lines.next_line().await.expect("read").expect("line");
    assert_eq!(line, r#"{"version":"2.0","id":1,"result":{"n":5}}"#);

    drop(client_write);
    drop(lines);
    let summary = handle.await.expect("join");
    assert_eq!(summary.requests, 1);
    assert_eq!(summary.reason, CloseReason::PeerClosed);
    assert_eq!(audit.len(), 1);
}
