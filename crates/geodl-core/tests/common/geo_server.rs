//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed set of paths with static bodies. Unknown paths get 404,
//! non-GET methods get 405. Every handled request bumps a hit counter so
//! tests can assert that skipped artifacts produce no network traffic.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, Copy)]
pub struct GeoServerOptions {
    /// If set, the body is written in chunks of this size with a flush
    /// between them (exercises streaming clients).
    pub chunk_size: Option<usize>,
}

impl Default for GeoServerOptions {
    fn default() -> Self {
        Self { chunk_size: None }
    }
}

/// Handle to a running test server.
pub struct GeoServer {
    base_url: String,
    hits: Arc<AtomicUsize>,
}

impl GeoServer {
    /// Base URL, e.g. "http://127.0.0.1:12345/".
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path` (which must start with '/').
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Number of requests handled so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread serving `routes` (path -> body).
/// The server runs until the process exits.
pub fn start(routes: HashMap<String, Vec<u8>>) -> GeoServer {
    start_with_options(routes, GeoServerOptions::default())
}

/// Like `start` but allows customizing server behavior (chunked writes).
pub fn start_with_options(routes: HashMap<String, Vec<u8>>, opts: GeoServerOptions) -> GeoServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    let hits = Arc::new(AtomicUsize::new(0));
    let server_hits = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let hits = Arc::clone(&server_hits);
            thread::spawn(move || handle(stream, &routes, &hits, opts));
        }
    });
    GeoServer {
        base_url: format!("http://127.0.0.1:{}/", port),
        hits,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &HashMap<String, Vec<u8>>,
    hits: &AtomicUsize,
    opts: GeoServerOptions,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (method, path) = parse_request(request);
    if method.is_empty() {
        return;
    }
    hits.fetch_add(1, Ordering::SeqCst);

    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nConnection: close\r\n\r\n");
        return;
    }

    let Some(body) = routes.get(path) else {
        let msg = b"not found";
        let response = format!(
            "HTTP/1.1 404 Not Found\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            msg.len()
        );
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.write_all(msg);
        return;
    };

    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nContent-Type: application/geo+json\r\nConnection: close\r\n\r\n",
        body.len()
    );
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    match opts.chunk_size {
        Some(n) if n > 0 => {
            for chunk in body.chunks(n) {
                if stream.write_all(chunk).is_err() {
                    return;
                }
                let _ = stream.flush();
            }
        }
        _ => {
            let _ = stream.write_all(body);
        }
    }
}

/// Returns (method, path) from the request line.
fn parse_request(request: &str) -> (&str, &str) {
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("/");
    (method, path)
}
