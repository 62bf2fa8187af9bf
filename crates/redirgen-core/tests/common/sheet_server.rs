//! Minimal HTTP/1.1 server that answers every GET with a fixed status and body.
//!
//! Stands in for the gviz endpoint in integration tests. Records the request
//! paths it saw so tests can assert on the query.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

pub struct SheetServer {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<String>>>,
}

/// Starts a server in a background thread. Returns its base URL
/// (e.g. "http://127.0.0.1:12345") and the shared request log.
pub fn start(status: u16, body: String) -> SheetServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    let body = Arc::new(body);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, status, &body, &log));
        }
    });
    SheetServer {
        base_url: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

fn handle(mut stream: std::net::TcpStream, status: u16, body: &str, log: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    if let Some(target) = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
    {
        log.lock().unwrap().push(target.to_string());
    }
    let response = format!(
        "HTTP/1.1 {} X\r\nContent-Type: text/javascript; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}

/// Wrap a gviz JSON object the way the endpoint does.
pub fn gviz_body(json: &str) -> String {
    format!("/*O_o*/\ngoogle.visualization.Query.setResponse({});", json)
}

/// Starts a server that accepts connections but never answers. Returns its base URL.
pub fn start_silent() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });
    format!("http://127.0.0.1:{}", port)
}
