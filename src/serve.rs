//! Development server for the compiled feed.
//!
//! Serves `[build.output]` over HTTP with `tiny_http` so the widget can be
//! pointed at a local feed:
//!
//! - Static file serving from the output directory
//! - Automatic `index.html` resolution for directories
//! - `Access-Control-Allow-Origin: *`, since the widget runs on other origins
//! - Graceful shutdown on Ctrl+C
//!
//! Requests are handled one at a time on the calling thread.

use crate::{config::ProfileConfig, log};
use anyhow::{Context, Result};
use std::{
    fs,
    io::Cursor,
    net::{IpAddr, SocketAddr},
    path::{Component, Path, PathBuf},
    sync::Arc,
};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

// ============================================================================
// Server Entry Point
// ============================================================================

/// Serve the output directory until Ctrl+C is received.
pub fn serve_feed(config: &ProfileConfig) -> Result<()> {
    let interface: IpAddr = config.serve.interface.parse()?;
    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}/{}", addr, config.build.feed.display());

    run(&server, &config.build.output);
    Ok(())
}

/// Handle requests until the server is unblocked.
fn run(server: &Server, serve_root: &Path) {
    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, serve_root) {
            log!("serve"; "request error: {e}");
        }
    }
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                let addr = server.server_addr().to_ip().unwrap_or(addr);
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow::anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

/// Handle a single HTTP request.
///
/// Resolution order:
/// 1. `OPTIONS` → CORS preflight
/// 2. Exact file match → serve file
/// 3. Directory with index.html → serve index.html
/// 4. Nothing found → 404
fn handle_request(request: Request, serve_root: &Path) -> Result<()> {
    match request.method() {
        Method::Options => return respond_preflight(request),
        Method::Get | Method::Head => {}
        _ => return respond_status(request, 405, "405 Method Not Allowed"),
    }

    let Some(local_path) = resolve_path(serve_root, request.url()) else {
        return respond_status(request, 404, "404 Not Found");
    };

    if local_path.is_file() {
        return serve_file(request, &local_path);
    }

    let index_path = local_path.join("index.html");
    if local_path.is_dir() && index_path.is_file() {
        return serve_file(request, &index_path);
    }

    respond_status(request, 404, "404 Not Found")
}

/// Map a request URL onto a path under `serve_root`.
///
/// Returns `None` for URLs that try to leave the root.
fn resolve_path(serve_root: &Path, url: &str) -> Option<PathBuf> {
    // Strip query string (e.g., ?t=123456) before resolving path
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let path = urlencoding::decode(path).ok()?;
    let relative = Path::new(path.trim_start_matches('/'));

    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return None;
    }

    Some(serve_root.join(relative))
}

// ============================================================================
// Response Helpers
// ============================================================================

fn header(field: &str, value: &str) -> Header {
    Header::from_bytes(field, value).expect("static header names and values are ASCII")
}

fn cors_header() -> Header {
    header("Access-Control-Allow-Origin", "*")
}

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let response = Response::from_data(content)
        .with_header(header("Content-Type", guess_content_type(path)))
        .with_header(header("Cache-Control", "no-cache"))
        .with_header(cors_header());

    request.respond(response)?;
    Ok(())
}

fn respond_preflight(request: Request) -> Result<()> {
    let response = Response::empty(StatusCode(204))
        .with_header(cors_header())
        .with_header(header("Access-Control-Allow-Methods", "GET, HEAD, OPTIONS"));
    request.respond(response)?;
    Ok(())
}

fn respond_status(request: Request, code: u16, body: &str) -> Result<()> {
    let response = Response::new(
        StatusCode(code),
        vec![header("Content-Type", "text/plain"), cors_header()],
        Cursor::new(body.as_bytes().to_vec()),
        Some(body.len()),
        None,
    );
    request.respond(response)?;
    Ok(())
}

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => "application/json; charset=utf-8",
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

// ============================================================================
// Tests
// ============================================================================
