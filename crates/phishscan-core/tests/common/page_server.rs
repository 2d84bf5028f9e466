//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves canned responses keyed by request path (query ignored). Each
//! connection is handled on its own thread and closed after one response.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Route {
    /// 200 with the given body.
    Html(String),
    /// 200 `application/rdap+json`.
    Json(String),
    /// 302 to the given location.
    Redirect(String),
    /// Arbitrary status with a body.
    Status(u16, String),
    /// Accept the request, never answer within the test's timeouts.
    Stall,
}

/// Starts a server in a background thread. Returns the base URL without a
/// trailing slash (e.g. "http://127.0.0.1:12345"). Unknown paths get 404.
pub fn start(routes: Vec<(&str, Route)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .into_iter()
            .map(|(p, r)| (p.to_string(), r))
            .collect(),
    );
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: std::net::TcpStream, routes: &HashMap<String, Route>) {
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
    let path = request_path(request);

    let (status, content_type, extra, body) = match routes.get(path) {
        Some(Route::Html(body)) => ("200 OK", "text/html", String::new(), body.clone()),
        Some(Route::Json(body)) => (
            "200 OK",
            "application/rdap+json",
            String::new(),
            body.clone(),
        ),
        Some(Route::Redirect(location)) => (
            "302 Found",
            "text/plain",
            format!("Location: {}\r\n", location),
            String::new(),
        ),
        Some(Route::Status(code, body)) => {
            let line = format!("{} Status", code);
            write_response(&mut stream, &line, "text/html", "", body);
            return;
        }
        Some(Route::Stall) => {
            thread::sleep(Duration::from_secs(30));
            return;
        }
        None => ("404 Not Found", "text/plain", String::new(), "not found".to_string()),
    };
    write_response(&mut stream, status, content_type, &extra, &body);
}

fn write_response(
    stream: &mut std::net::TcpStream,
    status: &str,
    content_type: &str,
    extra_headers: &str,
    body: &str,
) {
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n{}\r\n{}",
        status,
        content_type,
        body.len(),
        extra_headers,
        body
    );
    let _ = stream.write_all(response.as_bytes());
}

/// Path of the request line, without query string.
fn request_path(request: &str) -> &str {
    let target = request
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/");
    target.split('?').next().unwrap_or("/")
}
