//! Gemini client against a one-shot local HTTP server.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use stackforge_adapters::{ApiKey, FixedPacer, GeminiConfig, GeminiGenerator};
use stackforge_core::application::{GenerationClient, GenerationError, TextGenerator};

struct CapturedRequest {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl CapturedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Serve exactly one request with `status` and `body`, returning the base
/// URL and a receiver for what the client sent.
fn serve_once(status: u16, body: &'static str) -> (String, mpsc::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}/v1beta", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();

        let mut headers = Vec::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((k, v)) = line.split_once(':') {
                headers.push((k.trim().to_string(), v.trim().to_string()));
            }
        }

        let length = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, v)| v.parse::<usize>().ok())
            .unwrap_or(0);
        let mut buf = vec![0; length];
        reader.read_exact(&mut buf).unwrap();

        let reason = if status == 200 { "OK" } else { "Error" };
        let response = format!(
            "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let mut stream = stream;
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        tx.send(CapturedRequest {
            request_line: request_line.trim_end().to_string(),
            headers,
            body: String::from_utf8(buf).unwrap(),
        })
        .unwrap();
    });

    (base_url, rx)
}

fn generator(base_url: &str) -> GeminiGenerator {
    let config = GeminiConfig::new(ApiKey::new("test-key"))
        .with_base_url(base_url)
        .with_model("gemini-1.5-flash")
        .with_timeout(Duration::from_secs(5));
    GeminiGenerator::new(config).unwrap()
}

#[test]
fn successful_call_returns_first_candidate_text() {
    let (base_url, rx) = serve_once(
        200,
        r#"{"candidates":[{"content":{"parts":[{"text":"```python\nprint(1)\n```"}],"role":"model"},"finishReason":"STOP"}]}"#,
    );

    let text = generator(&base_url).generate("Write main.py").unwrap();
    assert_eq!(text, "```python\nprint(1)\n```");

    let request = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(
        request.request_line,
        "POST /v1beta/models/gemini-1.5-flash:generateContent HTTP/1.1"
    );
    assert_eq!(request.header("x-goog-api-key"), Some("test-key"));
    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"contents": [{"parts": [{"text": "Write main.py"}]}]})
    );
}

#[test]
fn quota_status_is_reported_with_message() {
    let (base_url, _rx) = serve_once(
        429,
        r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#,
    );

    let err = generator(&base_url).generate("prompt").unwrap_err();
    assert_eq!(
        err,
        GenerationError::Status {
            status: 429,
            message: "Resource has been exhausted".into(),
        }
    );
}

#[test]
fn empty_candidates_are_malformed() {
    let (base_url, _rx) = serve_once(200, r#"{"candidates":[]}"#);

    let err = generator(&base_url).generate("prompt").unwrap_err();
    assert!(matches!(err, GenerationError::MalformedResponse(_)));
}

#[test]
fn non_json_success_is_malformed() {
    let (base_url, _rx) = serve_once(200, "<html>not json</html>");

    let err = generator(&base_url).generate("prompt").unwrap_err();
    assert!(matches!(err, GenerationError::MalformedResponse(_)));
}

#[test]
fn refused_connection_is_transport_failure_without_key() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let base_url = format!("http://127.0.0.1:{port}/v1beta");

    let err = generator(&base_url).generate("prompt").unwrap_err();
    match err {
        GenerationError::Transport(message) => assert!(!message.contains("test-key")),
        other => panic!("expected transport failure, got {other:?}"),
    }
}

#[test]
fn client_folds_transport_failure_into_content() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let base_url = format!("http://127.0.0.1:{port}/v1beta");

    let mut client = GenerationClient::new(
        Box::new(generator(&base_url)),
        Box::new(FixedPacer::none()),
    );
    let result = client.generate("prompt");

    assert!(result.is_failure());
    let content = result.into_content("#");
    assert!(content.starts_with("# GENERATION FAILED: transport failure"));
    assert_eq!(client.failures(), 1);
}
