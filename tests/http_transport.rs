//! HTTP transport tests against a local one-shot server.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use deepreview::analysis::{self, AnalysisError, CompletionTransport, HttpTransport, build_request};
use deepreview::models::IngestedFile;

/// Serve exactly one request with a canned response; yields the raw request.
async fn serve_once(response: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        request
    });

    (format!("http://{addr}/v1/chat/completions"), handle)
}

/// Read headers and a Content-Length body.
async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .filter_map(|l| l.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, v)| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8(buf).unwrap()
}

fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

fn sample_file() -> IngestedFile {
    IngestedFile {
        name: "lib.rs".into(),
        size: 12,
        language: "Rust",
        content: "fn main() {}".into(),
    }
}

#[tokio::test]
async fn sends_bearer_credential_and_json_body() {
    let body = serde_json::json!({
        "choices": [{ "message": { "content": "{\"summary\":{\"totalIssues\":0,\"syntaxErrors\":0,\"logicIssues\":0,\"qualityIssues\":0,\"securityIssues\":0,\"performanceIssues\":0,\"overallScore\":97},\"issues\":[]}" } }]
    })
    .to_string();
    let (endpoint, server) = serve_once(http_response("200 OK", &body)).await;

    let transport = HttpTransport::new(endpoint);
    let result = analysis::analyze_file(&transport, "sk-local", "deepseek-coder", &sample_file())
        .await
        .unwrap();
    assert_eq!(result.summary.overall_score, 97);

    let request = server.await.unwrap();
    let lower = request.to_ascii_lowercase();
    assert!(request.starts_with("POST /v1/chat/completions"));
    assert!(lower.contains("authorization: bearer sk-local"));
    assert!(lower.contains("content-type: application/json"));
    assert!(request.contains("\"model\":\"deepseek-coder\""));
    assert!(request.contains("\"max_tokens\":4000"));
    assert!(request.contains("Analyze the following Rust code"));
}

#[tokio::test]
async fn non_success_status_is_reported_without_body() {
    let (endpoint, server) =
        serve_once(http_response("500 Internal Server Error", "{\"error\":\"boom\"}")).await;

    let transport = HttpTransport::new(endpoint);
    let request = build_request("deepseek-coder", &sample_file());
    let response = transport.send("sk-local", &request).await.unwrap();
    server.await.unwrap();

    assert_eq!(response.status, 500);
    assert_eq!(response.reason, "Internal Server Error");
    assert!(response.body.is_empty());
    assert!(!response.is_success());
}

#[tokio::test]
async fn unauthorized_maps_to_transport_error() {
    let (endpoint, server) = serve_once(http_response("401 Unauthorized", "{}")).await;

    let transport = HttpTransport::new(endpoint);
    let err = analysis::analyze_file(&transport, "sk-bad", "deepseek-coder", &sample_file())
        .await
        .unwrap_err();
    server.await.unwrap();

    assert_eq!(
        err,
        AnalysisError::Transport {
            status: 401,
            reason: "Unauthorized".into()
        }
    );
    assert_eq!(err.to_string(), "API request failed: 401 Unauthorized");
}

#[tokio::test]
async fn connection_refused_is_a_network_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = HttpTransport::new(format!("http://{addr}/v1/chat/completions"));
    let request = build_request("deepseek-coder", &sample_file());
    let err = transport.send("sk-local", &request).await.unwrap_err();
    assert!(matches!(err, AnalysisError::Network(_)));
}
