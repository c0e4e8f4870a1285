use super::send::{chat_target, split_message};
use super::types::{TgResponse, TgSentMessage};
use super::*;
use hwatch_core::{error::WatchError, traits::Channel};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve one canned HTTP reply per entry in `replies`, returning the base URL
/// and a handle yielding every raw request received.
async fn serve(replies: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut requests = Vec::new();
        for (status, body) in replies {
            let (mut socket, _) = listener.accept().await.unwrap();
            requests.push(read_request(&mut socket).await);
            let reply = format!(
                "HTTP/1.1 {status} Test\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        }
        requests
    });

    (format!("http://{addr}"), handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn channel_for(base: &str) -> TelegramChannel {
    TelegramChannel::new(TelegramConfig {
        bot_token: "TOKEN".into(),
        chat_id: "100".into(),
        api_url: base.to_string(),
    })
}

#[test]
fn test_split_short_message() {
    let chunks = split_message("hello", 4096);
    assert_eq!(chunks, vec!["hello"]);
}

#[test]
fn test_split_long_message() {
    let text = "a\n".repeat(3000);
    let chunks = split_message(&text, 4096);
    assert!(chunks.len() >= 2);
    for chunk in &chunks {
        assert!(chunk.len() <= 4096);
    }
    assert_eq!(chunks.concat(), text);
}

#[test]
fn test_split_respects_char_boundaries() {
    let text = "ж".repeat(10);
    let chunks = split_message(&text, 5);
    assert_eq!(chunks.concat(), text);
    for chunk in &chunks {
        assert!(chunk.len() <= 5);
    }
}

#[test]
fn test_split_limit_below_one_char_terminates() {
    assert_eq!(split_message("жж", 1), vec!["ж", "ж"]);
    assert_eq!(split_message("aж", 0), vec!["a", "ж"]);
}

#[test]
fn test_chat_target_numeric_and_username() {
    assert_eq!(chat_target("12345"), serde_json::json!(12345));
    assert_eq!(chat_target("-100123"), serde_json::json!(-100123));
    assert_eq!(chat_target("@reviews"), serde_json::json!("@reviews"));
}

#[test]
fn test_tg_response_error_shape() {
    let resp: TgResponse<TgSentMessage> = serde_json::from_str(
        r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#,
    )
    .unwrap();
    assert!(!resp.ok);
    assert!(resp.result.is_none());
    assert_eq!(
        resp.description.as_deref(),
        Some("Bad Request: chat not found")
    );
}

#[test]
fn test_base_url_strips_trailing_slash() {
    let channel = channel_for("https://api.telegram.org/");
    assert_eq!(channel.base_url, "https://api.telegram.org/botTOKEN");
}

#[tokio::test]
async fn test_send_posts_to_send_message() {
    let (base, server) = serve(vec![(200, r#"{"ok": true, "result": {"message_id": 7}}"#)]).await;
    let channel = channel_for(&base);

    channel.send("100", "hi there").await.unwrap();

    let requests = server.await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("POST /botTOKEN/sendMessage "));
    assert!(requests[0].contains(r#""chat_id":100"#));
    assert!(requests[0].contains(r#""text":"hi there""#));
}

#[tokio::test]
async fn test_send_reports_api_rejection() {
    let (base, server) = serve(vec![(
        400,
        r#"{"ok": false, "description": "Bad Request: chat not found"}"#,
    )])
    .await;
    let channel = channel_for(&base);

    let err = channel.send("100", "hi").await.unwrap_err();
    match err {
        WatchError::Delivery(msg) => assert!(msg.contains("chat not found")),
        other => panic!("expected delivery error, got {other:?}"),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn test_send_unreachable_api_is_delivery_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let channel = TelegramChannel::new(TelegramConfig {
        bot_token: "123456:SECRET-bot-token".into(),
        chat_id: "100".into(),
        api_url: format!("http://{addr}"),
    });
    let err = channel.send("100", "hi").await.unwrap_err();
    match err {
        WatchError::Delivery(msg) => {
            assert!(msg.starts_with("telegram send failed"));
            assert!(!msg.contains("SECRET"), "token leaked: {msg}");
        }
        other => panic!("expected delivery error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_send_without_chat_id_fails_fast() {
    let channel = channel_for("http://127.0.0.1:9");
    let err = channel.send("  ", "hi").await.unwrap_err();
    assert!(matches!(err, WatchError::Delivery(ref msg) if msg.contains("chat_id")));
}
