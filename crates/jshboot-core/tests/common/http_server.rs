//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed set of routes (bodies, error statuses, redirects, bodies cut
//! short or paused mid-transfer) and counts how many GETs hit each path.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Route {
    /// 200 with the given body.
    Ok(Vec<u8>),
    /// Bare status with an empty body.
    Status(u16),
    /// 302 to another path on this server.
    Redirect(String),
    /// 200 that announces `claimed_len` bytes but closes after `body`.
    Truncated { body: Vec<u8>, claimed_len: usize },
    /// 200 that sends the first `sent_before_stall` bytes of `body`, goes
    /// silent for `stall`, then sends the rest.
    Stall {
        body: Vec<u8>,
        sent_before_stall: usize,
        stall: Duration,
    },
}

pub struct TestServer {
    base: String,
    hits: Arc<Mutex<HashMap<String, usize>>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Number of GETs received for `path` (query string excluded).
    pub fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(routes: Vec<(&str, Route)>) -> TestServer {
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .into_iter()
            .map(|(p, r)| (p.to_string(), r))
            .collect(),
    );
    let hits = Arc::new(Mutex::new(HashMap::new()));
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let server_hits = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let hits = Arc::clone(&server_hits);
            thread::spawn(move || handle(stream, &routes, &hits));
        }
    });
    TestServer {
        base: format!("http://127.0.0.1:{}", port),
        hits,
    }
}

fn handle(
    mut stream: TcpStream,
    routes: &HashMap<String, Route>,
    hits: &Mutex<HashMap<String, usize>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
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
    let (method, target) = parse_request_line(request);
    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
        return;
    }
    let path = target.split('?').next().unwrap_or("");
    *hits.lock().unwrap().entry(path.to_string()).or_insert(0) += 1;

    match routes.get(path) {
        Some(Route::Ok(body)) => respond(&mut stream, "200 OK", "", body, body.len()),
        Some(Route::Status(code)) => {
            respond(&mut stream, &format!("{} Status", code), "", &[], 0)
        }
        Some(Route::Redirect(to)) => {
            let location = format!("Location: {}\r\n", to);
            respond(&mut stream, "302 Found", &location, &[], 0)
        }
        Some(Route::Truncated { body, claimed_len }) => {
            respond(&mut stream, "200 OK", "", body, *claimed_len)
        }
        Some(Route::Stall {
            body,
            sent_before_stall,
            stall,
        }) => {
            let (head, tail) = body.split_at((*sent_before_stall).min(body.len()));
            respond(&mut stream, "200 OK", "", head, body.len());
            thread::sleep(*stall);
            let _ = stream.write_all(tail);
            let _ = stream.flush();
        }
        None => respond(&mut stream, "404 Not Found", "", b"not found", 9),
    }
}

fn respond(stream: &mut TcpStream, status: &str, extra: &str, body: &[u8], content_length: usize) {
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n{}\r\n",
        status, content_length, extra
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();
}

/// Returns (method, request target) from the first request line.
fn parse_request_line(request: &str) -> (&str, &str) {
    let line = request.lines().next().unwrap_or("");
    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or("");
    let target = parts.next().unwrap_or("");
    (method, target)
}
