use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use mailmind_client::inbox::loader::{InboxLoader, LoadStatus};

pub fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

/// One-shot HTTP server on a random loopback port: accepts a single
/// connection, captures the request head and replies with the canned
/// response.
pub fn serve_once(response: String) -> (SocketAddr, Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut head = String::new();
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 {
                break;
            }
            if line == "\r\n" {
                break;
            }
            head.push_str(&line);
        }
        stream.write_all(response.as_bytes()).unwrap();
        let _ = tx.send(head);
    });

    (addr, rx)
}

/// An address nothing listens on: bind, read the port, drop the listener.
pub fn refused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

pub fn wait_resolved(loader: &mut InboxLoader) -> LoadStatus {
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if !matches!(loader.poll(), LoadStatus::Loading) {
            return loader.status().clone();
        }
        thread::sleep(Duration::from_millis(10));
    }
    panic!("fetch did not resolve in time");
}

pub const EMAILS_JSON: &str = r#"[
  {
    "id": 1,
    "email": "news@example.com",
    "body": "<p>Hello <b>world</b></p>",
    "email_type": "newsletter",
    "confidence_score": 0.91,
    "needs_review": false,
    "created_at": "2025-06-01T10:00:00"
  }
]"#;
