//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed routing table: bodies, redirects and bare status codes.
//! Every connection handles one request and is then closed.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Route {
    /// 200 with this body.
    Body(Vec<u8>),
    /// Redirect status with a `Location` header.
    Redirect(u16, String),
    /// Bare status with an empty body.
    Status(u16),
    /// Reads the request, then holds the connection open without replying.
    Stall(Duration),
}

/// Starts a server on a background thread. Returns the base URL without a
/// trailing slash (e.g. "http://127.0.0.1:12345"). Unknown paths get 404.
pub fn start(routes: HashMap<String, Route>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        301 => "Moved Permanently",
        302 => "Found",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");

    let empty: &[u8] = &[];
    let (status, extra, body) = match routes.get(path) {
        Some(Route::Body(b)) => (200, String::new(), b.as_slice()),
        Some(Route::Redirect(code, to)) => (*code, format!("Location: {}\r\n", to), empty),
        Some(Route::Status(code)) => (*code, String::new(), empty),
        Some(Route::Stall(hold)) => {
            thread::sleep(*hold);
            return;
        }
        None => (404, String::new(), empty),
    };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        status,
        reason(status),
        body.len(),
        extra
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}
