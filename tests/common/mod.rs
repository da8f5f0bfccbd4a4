//! In-process stand-in for the texts REST API.
//!
//! Speaks just enough HTTP/1.1 for a blocking client: one request per
//! connection, `Content-Length` bodies, `Connection: close` responses.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{Value, json};

#[derive(Default)]
struct ApiState {
    texts: Vec<Value>,
    next_id: i64,
    /// "METHOD /path" of every request served, in order
    requests: Vec<String>,
    fail_with: Option<u16>,
}

pub struct FakeApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

/// A text as the API serializes it
pub fn text(id: i64, body: &str, text_type: u8) -> Value {
    json!({
        "textId": id,
        "text": body,
        "textType": text_type,
        "dateCreated": "2024-03-05T10:00:00",
        "modifiedDate": "2024-03-06T09:30:00",
    })
}

impl FakeApi {
    pub fn start(texts: Vec<Value>) -> FakeApi {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fake api");
        let addr = listener.local_addr().expect("local addr");
        let next_id = texts
            .iter()
            .filter_map(|t| t["textId"].as_i64())
            .max()
            .unwrap_or(0)
            + 1;
        let state = Arc::new(Mutex::new(ApiState {
            texts,
            next_id,
            ..Default::default()
        }));

        let shared = Arc::clone(&state);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let shared = Arc::clone(&shared);
                thread::spawn(move || handle_connection(stream, &shared));
            }
        });

        FakeApi { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/Api", self.addr)
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn texts(&self) -> Vec<Value> {
        self.state.lock().unwrap().texts.clone()
    }

    /// Answer every following request with `status`
    pub fn fail_with(&self, status: u16) {
        self.state.lock().unwrap().fail_with = Some(status);
    }
}

fn handle_connection(stream: TcpStream, state: &Mutex<ApiState>) {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).is_err() {
            return;
        }
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':')
            && name.eq_ignore_ascii_case("content-length")
        {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }
    let mut body = vec![0u8; content_length];
    if reader.read_exact(&mut body).is_err() {
        return;
    }

    let (status, payload) = route(state, &method, &path, &body);
    let reason = match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        _ => "Error",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        payload.len(),
        payload
    );
    let mut stream = reader.into_inner();
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn route(state: &Mutex<ApiState>, method: &str, path: &str, body: &[u8]) -> (u16, String) {
    let mut state = state.lock().unwrap();
    state.requests.push(format!("{} {}", method, path));
    if let Some(status) = state.fail_with {
        return (status, json!({"title": "failure"}).to_string());
    }

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    match (method, segments.as_slice()) {
        ("GET", ["Api", "Texts", "GET-ALL"]) => (200, Value::Array(state.texts.clone()).to_string()),
        ("POST", ["Api", "Texts"]) => {
            let Ok(input) = serde_json::from_slice::<Value>(body) else {
                return (400, String::new());
            };
            let id = state.next_id;
            state.next_id += 1;
            let mut record = text(id, input["text"].as_str().unwrap_or_default(), 0);
            record["textType"] = input["textType"].clone();
            record["dateCreated"] = json!("2024-04-01T12:00:00");
            record["modifiedDate"] = json!("2024-04-01T12:00:00");
            state.texts.push(record.clone());
            (200, record.to_string())
        }
        ("PUT", ["Api", "Texts", "Edit", id]) => {
            let Ok(input) = serde_json::from_slice::<Value>(body) else {
                return (400, String::new());
            };
            let id: i64 = id.parse().unwrap_or(-1);
            match state.texts.iter_mut().find(|t| t["textId"] == id) {
                Some(record) => {
                    record["text"] = input["text"].clone();
                    record["textType"] = input["textType"].clone();
                    record["modifiedDate"] = json!("2024-04-02T08:00:00");
                    (200, record.to_string())
                }
                None => (404, String::new()),
            }
        }
        ("DELETE", ["Api", "Texts", id]) => {
            let id: i64 = id.parse().unwrap_or(-1);
            let before = state.texts.len();
            state.texts.retain(|t| t["textId"] != id);
            if state.texts.len() < before {
                (200, String::new())
            } else {
                (404, String::new())
            }
        }
        _ => (404, String::new()),
    }
}
