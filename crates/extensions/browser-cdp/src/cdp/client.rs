//! CDP WebSocket client.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, trace, warn};

use super::error::CdpError;
use super::protocol::{BrowserVersion, CdpRequest, CdpResponse};
use super::session::PageSession;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;
type PendingMap = Arc<Mutex<HashMap<u64, oneshot::Sender<Result<Value, CdpError>>>>>;

/// Upper bound for a single CDP command round trip.
const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// The WebSocket shared by the browser client and every page session.
pub(crate) struct Connection {
    ws_tx: tokio::sync::Mutex<WsSink>,
    request_id: AtomicU64,
    pending: PendingMap,
    closed: Arc<AtomicBool>,
}

impl Connection {
    /// Send a command and wait for its response.
    pub(crate) async fn send(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = CdpRequest {
            id,
            method: method.to_string(),
            params,
            session_id: session_id.map(|s| s.to_string()),
        };

        let json = serde_json::to_string(&request)?;
        trace!("CDP send: {}", json);

        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, tx);
        // Checked after the insert: the receive loop sets `closed` before it
        // drains `pending`, so a request is either drained or refused here.
        if self.is_closed() {
            self.pending.lock().remove(&id);
            return Err(CdpError::SessionClosed);
        }

        {
            let mut ws = self.ws_tx.lock().await;
            if let Err(e) = ws.send(Message::Text(json.into())).await {
                self.pending.lock().remove(&id);
                return Err(e.into());
            }
        }

        match tokio::time::timeout(COMMAND_TIMEOUT, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CdpError::SessionClosed),
            Err(_) => {
                self.pending.lock().remove(&id);
                Err(CdpError::Timeout(format!("Request {} timed out", method)))
            }
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// CDP client for browser automation.
///
/// Holds the browser-level WebSocket; pages are attached as flattened
/// sessions on the same socket.
pub struct CdpClient {
    /// Product string, known only when connected through the HTTP endpoint.
    product: Option<String>,
    conn: Arc<Connection>,
    _recv_task: tokio::task::JoinHandle<()>,
}

impl CdpClient {
    /// Connect to Chrome at the given HTTP debugging endpoint
    /// (e.g. `http://localhost:9222`).
    pub async fn connect(endpoint: &str) -> Result<Self, CdpError> {
        let version_url = format!("{}/json/version", endpoint.trim_end_matches('/'));
        debug!("Fetching browser version from {}", version_url);

        let version: BrowserVersion = reqwest::get(&version_url)
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?
            .json()
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?;

        let mut client = Self::connect_ws(&version.web_socket_debugger_url).await?;
        debug!("Connected to {} (protocol {})", version.browser, version.protocol_version);
        client.product = Some(version.browser);
        Ok(client)
    }

    /// Connect directly to a browser WebSocket URL.
    pub async fn connect_ws(ws_url: &str) -> Result<Self, CdpError> {
        url::Url::parse(ws_url)?;

        let (ws_stream, _) = tokio_tungstenite::connect_async(ws_url)
            .await
            .map_err(|e| CdpError::ConnectionFailed(format!("WebSocket: {}", e)))?;

        let (ws_sink, ws_source) = ws_stream.split();
        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
        let closed = Arc::new(AtomicBool::new(false));

        let recv_task = {
            let pending = pending.clone();
            let closed = closed.clone();
            tokio::spawn(async move {
                Self::receive_loop(ws_source, pending.clone()).await;
                closed.store(true, Ordering::SeqCst);
                // Fail everything still in flight instead of letting it time out.
                for (_, tx) in pending.lock().drain() {
                    let _ = tx.send(Err(CdpError::SessionClosed));
                }
            })
        };

        debug!("CDP client connected to {}", ws_url);

        Ok(Self {
            product: None,
            conn: Arc::new(Connection {
                ws_tx: tokio::sync::Mutex::new(ws_sink),
                request_id: AtomicU64::new(1),
                pending,
                closed,
            }),
            _recv_task: recv_task,
        })
    }

    /// WebSocket receive loop. Returns when the socket closes.
    async fn receive_loop(mut ws_source: WsSource, pending: PendingMap) {
        while let Some(msg) = ws_source.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    trace!("CDP recv: {}", text);
                    let resp = match serde_json::from_str::<CdpResponse>(&text) {
                        Ok(resp) => resp,
                        Err(e) => {
                            warn!("Failed to parse CDP message: {}", e);
                            continue;
                        }
                    };

                    let Some(id) = resp.id else {
                        // Events are not consumed.
                        continue;
                    };
                    let Some(tx) = pending.lock().remove(&id) else {
                        continue;
                    };
                    let result = match resp.error {
                        Some(error) => Err(CdpError::Protocol {
                            code: error.code,
                            message: error.message,
                        }),
                        None => Ok(resp.result.unwrap_or(Value::Null)),
                    };
                    let _ = tx.send(result);
                }
                Ok(Message::Close(_)) => {
                    debug!("WebSocket closed");
                    break;
                }
                Err(e) => {
                    error!("WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    }

    /// Send a browser-level CDP command.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.conn.send(method, params, None).await
    }

    /// Browser product, e.g. `Chrome/130.0.6723.58`.
    pub fn product(&self) -> Option<&str> {
        self.product.as_deref()
    }

    /// Whether the WebSocket to Chrome has gone away.
    pub fn is_closed(&self) -> bool {
        self.conn.is_closed()
    }

    /// Open a new tab and attach to it.
    pub async fn new_page(&self, url: Option<&str>) -> Result<PageSession, CdpError> {
        let result = self
            .call(
                "Target.createTarget",
                Some(json!({"url": url.unwrap_or("about:blank")})),
            )
            .await?;

        let target_id = result["targetId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing targetId".to_string()))?
            .to_string();
        debug!("Created target {}", target_id);

        self.attach_page(&target_id).await
    }

    /// Attach to an existing page target.
    pub async fn attach_page(&self, target_id: &str) -> Result<PageSession, CdpError> {
        let result = self
            .call(
                "Target.attachToTarget",
                Some(json!({
                    "targetId": target_id,
                    "flatten": true
                })),
            )
            .await?;

        let session_id = result["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing sessionId".to_string()))?
            .to_string();

        let session = PageSession::new(target_id.to_string(), session_id, self.conn.clone());
        session.enable_domains().await?;
        Ok(session)
    }

    /// Close a page target.
    pub async fn close_page(&self, target_id: &str) -> Result<(), CdpError> {
        self.call("Target.closeTarget", Some(json!({"targetId": target_id})))
            .await?;
        Ok(())
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self._recv_task.abort();
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
