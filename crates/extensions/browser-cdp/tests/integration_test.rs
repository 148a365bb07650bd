//! CDP client tests against an in-process WebSocket server speaking a small
//! subset of the DevTools protocol.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

use pokernow_browser::{CdpClient, CdpError, CdpPage};
use pokernow_protocols::{BrowserSession, DomAccessor, DomError};

const GAME_URL: &str = "https://www.pokernow.club/games/pglXyz";

/// Canned answer for one CDP command. `None` closes the socket.
fn respond(method: &str, params: &Value) -> Option<Value> {
    let result = match method {
        "Target.createTarget" => json!({"result": {"targetId": "T1"}}),
        "Target.attachToTarget" => json!({"result": {"sessionId": "S1"}}),
        "Runtime.evaluate" => match params["expression"].as_str().unwrap_or_default() {
            "window.location.href" => json!({"result": {"result": {"type": "string", "value": GAME_URL}}}),
            expr if expr.contains(".table-player\"") => json!({
                "result": {"result": {"type": "object", "subtype": "node", "objectId": "seat-1"}}
            }),
            _ => json!({"result": {"result": {"type": "object", "subtype": "null", "value": null}}}),
        },
        "Runtime.callFunctionOn" => json!({"result": {"result": {"type": "string", "value": "alice"}}}),
        "Network.getCookies" => json!({"result": {"cookies": [{
            "name": "npt", "value": "token", "domain": ".pokernow.club", "path": "/",
            "expires": -1, "size": 8, "httpOnly": true, "secure": true, "session": true
        }]}}),
        "Test.hangUp" => return None,
        "Test.unknown" => json!({"error": {"code": -32601, "message": "'Test.unknown' wasn't found"}}),
        _ => json!({"result": {}}),
    };
    Some(result)
}

/// Start a mock browser endpoint and return its WebSocket URL.
async fn spawn_mock_chrome() -> String {
    spawn_mock_chrome_with(respond).await
}

/// Like [`spawn_mock_chrome`] with a custom responder.
async fn spawn_mock_chrome_with<F>(responder: F) -> String
where
    F: Fn(&str, &Value) -> Option<Value> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();

        while let Some(Ok(msg)) = ws.next().await {
            let Message::Text(text) = msg else { continue };
            let request: Value = serde_json::from_str(&text).unwrap();
            let method = request["method"].as_str().unwrap_or_default();

            let Some(mut reply) = responder(method, &request["params"]) else {
                let _ = ws.close(None).await;
                return;
            };
            reply["id"] = request["id"].clone();
            if let Some(session) = request.get("sessionId") {
                reply["sessionId"] = session.clone();
            }
            ws.send(Message::Text(reply.to_string().into())).await.unwrap();
        }
    });

    format!("ws://{}/devtools/browser/mock", addr)
}

#[tokio::test]
async fn test_page_reads_through_dom_accessor() {
    let client = CdpClient::connect_ws(&spawn_mock_chrome().await).await.unwrap();
    let session = client.new_page(None).await.unwrap();
    assert_eq!(session.target_id(), "T1");
    assert_eq!(session.session_id(), "S1");

    let page = CdpPage::new(Arc::new(session));
    let seat = page.query(".table-player", None).await.unwrap().unwrap();
    assert_eq!(seat.id(), "seat-1");
    assert_eq!(page.text(&seat).await.unwrap(), "alice");

    assert!(page.query(".dealer-button-ctn", None).await.unwrap().is_none());
    assert!(page
        .wait_for(".dealer-button-ctn", Duration::from_millis(300))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_wait_for_retries_through_navigation_errors() {
    let seat_queries = Arc::new(AtomicUsize::new(0));
    let counter = seat_queries.clone();
    let url = spawn_mock_chrome_with(move |method, params| {
        let is_seat_query = method == "Runtime.evaluate"
            && params["expression"].as_str().unwrap_or_default().contains(".table-player\"");
        if is_seat_query && counter.fetch_add(1, Ordering::SeqCst) == 0 {
            return Some(json!({
                "error": {"code": -32000, "message": "Execution context was destroyed."}
            }));
        }
        respond(method, params)
    })
    .await;

    let client = CdpClient::connect_ws(&url).await.unwrap();
    let page = CdpPage::new(Arc::new(client.new_page(None).await.unwrap()));

    let seat = page
        .wait_for(".table-player", Duration::from_secs(2))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(seat.id(), "seat-1");
    assert!(seat_queries.load(Ordering::SeqCst) >= 2);
}

#[tokio::test]
async fn test_wait_for_fails_fast_when_socket_closes() {
    let url = spawn_mock_chrome_with(|method, params| {
        if method == "Runtime.evaluate" {
            return None;
        }
        respond(method, params)
    })
    .await;

    let client = CdpClient::connect_ws(&url).await.unwrap();
    let page = CdpPage::new(Arc::new(client.new_page(None).await.unwrap()));

    let err = page
        .wait_for(".table-player", Duration::from_secs(5))
        .await
        .unwrap_err();
    assert_eq!(err, DomError::SessionClosed);
}

#[tokio::test]
async fn test_page_session_cookies_and_url() {
    let client = CdpClient::connect_ws(&spawn_mock_chrome().await).await.unwrap();
    let page = CdpPage::new(Arc::new(client.new_page(None).await.unwrap()));

    assert_eq!(page.current_url().await.unwrap(), GAME_URL);

    let cookies = page.get_cookies().await.unwrap();
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].matches_url(GAME_URL));
    page.set_cookies(&cookies).await.unwrap();
}

#[tokio::test]
async fn test_protocol_error_is_reported() {
    let client = CdpClient::connect_ws(&spawn_mock_chrome().await).await.unwrap();

    let err = client.call("Test.unknown", None).await.unwrap_err();
    assert!(matches!(err, CdpError::Protocol { code: -32601, .. }));
}

#[tokio::test]
async fn test_closed_socket_fails_calls_as_session_closed() {
    let client = CdpClient::connect_ws(&spawn_mock_chrome().await).await.unwrap();
    let page = CdpPage::new(Arc::new(client.new_page(None).await.unwrap()));

    let err = client.call("Test.hangUp", None).await.unwrap_err();
    assert!(matches!(err, CdpError::SessionClosed));
    assert!(client.is_closed());

    let err = page.query(".table-player", None).await.unwrap_err();
    assert_eq!(err, DomError::SessionClosed);
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_connect_to_missing_endpoint() {
    let err = CdpClient::connect_ws("ws://127.0.0.1:9/devtools/browser/none")
        .await
        .err()
        .unwrap();
    assert!(matches!(err, CdpError::ConnectionFailed(_)));
}
