//! Local preview of the generated site
//!
//! Serves the public directory as-is. With live reload on, the site is
//! regenerated on every source change and open pages refresh themselves
//! over a WebSocket once the new build is published.

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::header,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::commands::generate;
use crate::generator::BuildReport;
use crate::Site;

const RELOAD_ROUTE: &str = "/__reload";

/// Pages injected with this snippet reload when a rebuild is published
const RELOAD_SNIPPET: &str = r#"<script>
new WebSocket("ws://" + location.host + "/__reload").onmessage = function () { location.reload(); };
</script>
"#;

/// Upper bound on an HTML page read back for injection
const MAX_PAGE_BYTES: usize = 16 * 1024 * 1024;

/// Serve the public directory, optionally regenerating on change
pub async fn start(site: &Site, ip: &str, port: u16, live_reload: bool) -> Result<()> {
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{bind_ip}:{port}").parse()?;

    let (reload_tx, _) = broadcast::channel::<()>(16);
    let app = router(site, live_reload, reload_tx.clone());

    if live_reload {
        let site = site.clone();
        tokio::task::spawn_blocking(move || {
            let published = |_: &BuildReport| {
                let _ = reload_tx.send(());
            };
            if let Err(e) = generate::watch(&site, published) {
                tracing::error!("File watcher stopped: {}", e);
            }
        });
    }

    tracing::info!("Serving {:?} at http://{}:{}", site.public_dir, ip, port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(site: &Site, live_reload: bool, reload_tx: broadcast::Sender<()>) -> Router {
    let files = ServeDir::new(&site.public_dir).append_index_html_on_directories(true);
    let app = Router::new().fallback_service(files);

    let app = if live_reload {
        app.layer(middleware::map_response(inject_reload_snippet))
            .route(RELOAD_ROUTE, get(reload_socket))
            .with_state(reload_tx)
    } else {
        app.with_state(reload_tx)
    };

    app.layer(TraceLayer::new_for_http())
}

async fn reload_socket(
    ws: WebSocketUpgrade,
    State(reload_tx): State<broadcast::Sender<()>>,
) -> impl IntoResponse {
    let reloads = reload_tx.subscribe();
    ws.on_upgrade(move |socket| notify_reloads(socket, reloads))
}

async fn notify_reloads(mut socket: WebSocket, mut reloads: broadcast::Receiver<()>) {
    loop {
        match reloads.recv().await {
            Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {
                if socket.send(Message::Text("reload".to_string())).await.is_err() {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn inject_reload_snippet(response: Response) -> Response {
    let is_html = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("text/html"))
        .unwrap_or(false);
    if !is_html {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    match to_bytes(body, MAX_PAGE_BYTES).await {
        Ok(bytes) => {
            let page = with_reload_snippet(&String::from_utf8_lossy(&bytes));
            parts.headers.remove(header::CONTENT_LENGTH);
            axum::http::Response::from_parts(parts, Body::from(page))
        }
        Err(e) => {
            tracing::warn!("Could not read page for live reload: {}", e);
            axum::http::Response::from_parts(parts, Body::empty())
        }
    }
}

/// Insert the reload snippet just before `</body>`, or append it
fn with_reload_snippet(page: &str) -> String {
    match page.rfind("</body>") {
        Some(at) => format!("{}{}{}", &page[..at], RELOAD_SNIPPET, &page[at..]),
        None => format!("{page}{RELOAD_SNIPPET}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_goes_before_body_end() {
        let page = with_reload_snippet("<html><body><p>x</p></body></html>");
        assert!(page.find("<p>x</p>").unwrap() < page.find(RELOAD_ROUTE).unwrap());
        assert!(page.ends_with("</script>\n</body></html>"));
    }

    #[test]
    fn test_snippet_appended_to_fragment() {
        let page = with_reload_snippet("<p>fragment</p>");
        assert!(page.starts_with("<p>fragment</p><script>"));
    }

    #[tokio::test]
    async fn test_only_html_is_injected() {
        let css = axum::http::Response::builder()
            .header(header::CONTENT_TYPE, "text/css")
            .body(Body::from("body {}"))
            .unwrap();
        let css = inject_reload_snippet(css).await;
        let bytes = to_bytes(css.into_body(), MAX_PAGE_BYTES).await.unwrap();
        assert_eq!(&bytes[..], b"body {}");

        let html = axum::http::Response::builder()
            .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
            .header(header::CONTENT_LENGTH, "21")
            .body(Body::from("<body><p>x</p></body>"))
            .unwrap();
        let html = inject_reload_snippet(html).await;
        assert!(html.headers().get(header::CONTENT_LENGTH).is_none());
        let bytes = to_bytes(html.into_body(), MAX_PAGE_BYTES).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains(RELOAD_ROUTE));
    }
}
