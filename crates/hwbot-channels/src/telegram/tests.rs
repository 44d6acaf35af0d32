use super::send::{parse_send_response, split_message};
use super::*;
use hwbot_core::traits::Notifier;
use reqwest::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

fn notifier(api_base: &str) -> TelegramNotifier {
    TelegramNotifier::new(api_base, "123:abc", "4242", Duration::from_secs(5)).unwrap()
}

/// Accept one connection, read the full request (head and body), answer with
/// `status_line` and `body`, and hand back the raw request.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = sock.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&raw).to_string();
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .find_map(|l| {
                        let (k, v) = l.split_once(':')?;
                        k.eq_ignore_ascii_case("content-length")
                            .then(|| v.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if raw.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        sock.write_all(response.as_bytes()).await.unwrap();
        let _ = sock.shutdown().await;
        String::from_utf8_lossy(&raw).into_owned()
    });
    (format!("http://{addr}"), handle)
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
        assert!(chunk.chars().count() <= 4096);
    }
    assert_eq!(chunks.concat(), text);
}

#[test]
fn test_split_multibyte_without_newlines() {
    // Two-byte chars: a byte-based cut would land mid-character.
    let text = "ж".repeat(10);
    let chunks = split_message(&text, 4);
    assert_eq!(chunks, vec!["жжжж", "жжжж", "жж"]);
}

#[test]
fn test_new_accepts_channel_username() {
    let n = TelegramNotifier::new(
        "https://api.telegram.org",
        "t",
        " @my_channel ",
        Duration::from_secs(1),
    )
    .unwrap();
    assert_eq!(n.chat_id(), &ChatId::Username("@my_channel".into()));
}

#[test]
fn test_new_rejects_empty_chat_id() {
    let err = TelegramNotifier::new("https://api.telegram.org", "t", "  ", Duration::from_secs(1))
        .unwrap_err();
    assert!(matches!(err, BotError::Config(_)));
}

#[test]
fn test_new_accepts_negative_group_chat_id() {
    let n = TelegramNotifier::new(
        "https://api.telegram.org/",
        "t",
        "-100123",
        Duration::from_secs(1),
    )
    .unwrap();
    assert_eq!(n.chat_id(), &ChatId::Id(-100123));
}

#[test]
fn test_debug_hides_token() {
    let n = notifier("https://api.telegram.org");
    let dbg = format!("{n:?}");
    assert!(!dbg.contains("123:abc"));
    assert!(dbg.contains("4242"));
}

#[test]
fn test_build_send_request() {
    let n = notifier("https://api.telegram.org/");
    let req = n.build_send_request("hi there").unwrap();
    assert_eq!(req.method(), reqwest::Method::POST);
    assert_eq!(
        req.url().as_str(),
        "https://api.telegram.org/bot123:abc/sendMessage"
    );
    let body = req.body().and_then(|b| b.as_bytes()).unwrap();
    let json: serde_json::Value = serde_json::from_slice(body).unwrap();
    assert_eq!(json["chat_id"], 4242);
    assert_eq!(json["text"], "hi there");
    assert!(json.get("parse_mode").is_none());
}

#[test]
fn test_build_send_request_with_channel_username() {
    let n = TelegramNotifier::new(
        "https://api.telegram.org",
        "123:abc",
        "@my_channel",
        Duration::from_secs(5),
    )
    .unwrap();
    let req = n.build_send_request("hi").unwrap();
    let body = req.body().and_then(|b| b.as_bytes()).unwrap();
    let json: serde_json::Value = serde_json::from_slice(body).unwrap();
    assert_eq!(json["chat_id"], "@my_channel");
}

#[test]
fn test_parse_send_response_ok() {
    let body = r#"{"ok":true,"result":{"message_id":77,"chat":{"id":4242,"type":"private"},"date":1700000000,"text":"hi"}}"#;
    let receipt = parse_send_response(StatusCode::OK, body).unwrap();
    assert_eq!(receipt.message_id, 77);
    assert_eq!(receipt.chat_id, 4242);
}

#[test]
fn test_parse_send_response_api_error() {
    let body = r#"{"ok":false,"error_code":403,"description":"Forbidden: bot was blocked by the user"}"#;
    let err = parse_send_response(StatusCode::FORBIDDEN, body).unwrap_err();
    match err {
        BotError::Delivery(msg) => assert!(msg.contains("bot was blocked")),
        other => panic!("expected Delivery, got {other:?}"),
    }
}

#[test]
fn test_parse_send_response_unreadable_body() {
    let err = parse_send_response(StatusCode::BAD_GATEWAY, "<html>").unwrap_err();
    assert!(matches!(err, BotError::Delivery(_)));
}

#[tokio::test]
async fn test_notify_round_trip() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"ok":true,"result":{"message_id":5,"chat":{"id":4242}}}"#,
    )
    .await;
    let n = notifier(&base);

    let receipt = n.notify("Your work \"hw\" has been checked!").await.unwrap();
    assert_eq!(receipt.message_id, 5);

    let raw = server.await.unwrap();
    assert!(raw.starts_with("POST /bot123:abc/sendMessage HTTP/1.1"));
    assert!(raw.contains(r#""chat_id":4242"#));
    assert!(raw.contains("has been checked!"));
}

#[tokio::test]
async fn test_notify_channel_username_round_trip() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"ok":true,"result":{"message_id":9,"chat":{"id":-1001234567890}}}"#,
    )
    .await;
    let n = TelegramNotifier::new(&base, "123:abc", "@my_channel", Duration::from_secs(5)).unwrap();

    let receipt = n.notify("hello channel").await.unwrap();
    assert_eq!(receipt.chat_id, -1001234567890);

    let raw = server.await.unwrap();
    assert!(raw.contains(r#""chat_id":"@my_channel""#));
}

#[tokio::test]
async fn test_notify_connection_refused_is_delivery_error_without_token() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let n = notifier(&format!("http://{addr}"));
    let err = n.notify("hello").await.unwrap_err();
    match err {
        BotError::Delivery(msg) => assert!(!msg.contains("123:abc"), "token leaked: {msg}"),
        other => panic!("expected Delivery, got {other:?}"),
    }
}

#[tokio::test]
async fn test_notify_rejects_empty_text() {
    let n = notifier("http://127.0.0.1:9");
    let err = n.notify("   ").await.unwrap_err();
    assert!(matches!(err, BotError::Delivery(_)));
}
