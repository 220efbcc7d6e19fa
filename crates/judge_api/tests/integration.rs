use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};

use judge_api::{JudgeApiClient, JudgeApiConfig, JudgeApiError, SubmissionRequest, Verdict};
use reqwest::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

#[derive(Clone)]
struct ScriptedResponse {
    status: u16,
    delay_ms: u64,
    body: String,
}

struct ScriptedServer {
    base_url: String,
    request_count: Arc<AtomicUsize>,
    bodies: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl ScriptedServer {
    async fn new(scripts: Vec<ScriptedResponse>) -> Self {
        let scripts = Arc::new(scripts);
        let request_count = Arc::new(AtomicUsize::new(0));
        let bodies = Arc::new(Mutex::new(Vec::new()));
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("local TCP listener should bind");
        let addr = listener
            .local_addr()
            .expect("resolved local listener address");
        let base_url = format!("http://{addr}");

        let handle = tokio::spawn({
            let scripts = Arc::clone(&scripts);
            let request_count = Arc::clone(&request_count);
            let bodies = Arc::clone(&bodies);

            async move {
                loop {
                    let (socket, _) = match listener.accept().await {
                        Ok(pair) => pair,
                        Err(_) => break,
                    };
                    let scripts = Arc::clone(&scripts);
                    let request_count = Arc::clone(&request_count);
                    let bodies = Arc::clone(&bodies);
                    tokio::spawn(async move {
                        serve_one(socket, scripts, request_count, bodies).await;
                    });
                }
            }
        });

        Self {
            base_url,
            request_count,
            bodies,
            handle,
        }
    }

    fn request_count(&self) -> usize {
        self.request_count.load(Ordering::Acquire)
    }

    fn bodies(&self) -> Vec<String> {
        self.bodies.lock().expect("bodies lock").clone()
    }

    fn shutdown(&self) {
        self.handle.abort();
    }
}

fn respond(status: u16, body: &str) -> ScriptedResponse {
    ScriptedResponse {
        status,
        delay_ms: 0,
        body: body.to_string(),
    }
}

fn client_for(server: &ScriptedServer) -> JudgeApiClient {
    let config = JudgeApiConfig::new("test-key").with_base_url(&server.base_url);
    JudgeApiClient::new(config).expect("client")
}

#[tokio::test]
async fn submit_accepted_round_trip_sends_one_request() {
    let server = ScriptedServer::new(vec![respond(
        200,
        r#"{"stdout":"hello\n","time":"0.004","memory":1024,"status":{"id":3,"description":"Accepted"}}"#,
    )])
    .await;
    let client = client_for(&server);

    let verdict = client
        .execute(&SubmissionRequest::new(71, "print('hello')", ""), None)
        .await
        .expect("execution should succeed");

    assert_eq!(
        verdict,
        Verdict::Accepted {
            stdout: Some("hello\n".to_string()),
            time_secs: Some(0.004),
            memory_kb: Some(1024),
        }
    );
    assert_eq!(server.request_count(), 1);
    let bodies = server.bodies();
    assert!(bodies[0].contains(r#""language_id":71"#));
    assert!(bodies[0].contains(r#""expected_output":null"#));

    server.shutdown();
}

#[tokio::test]
async fn submit_non_success_status_is_not_retried() {
    let server = ScriptedServer::new(vec![
        respond(503, r#"{"message":"upstream unavailable"}"#),
        respond(200, r#"{"status":{"id":3,"description":"Accepted"}}"#),
    ])
    .await;
    let client = client_for(&server);

    let error = client
        .submit(&SubmissionRequest::new(71, "print(1)", ""), None)
        .await
        .expect_err("503 should surface as an error");

    match error {
        JudgeApiError::Status(status, message) => {
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(server.request_count(), 1);

    server.shutdown();
}

#[tokio::test]
async fn submit_malformed_body_is_a_serde_error() {
    let server = ScriptedServer::new(vec![respond(200, "not json")]).await;
    let client = client_for(&server);

    let error = client
        .submit(&SubmissionRequest::new(71, "print(1)", ""), None)
        .await
        .expect_err("malformed body should fail");

    assert!(matches!(error, JudgeApiError::Serde(_)));

    server.shutdown();
}

#[tokio::test]
async fn submit_can_be_cancelled_while_waiting() {
    let server = ScriptedServer::new(vec![ScriptedResponse {
        status: 200,
        delay_ms: 2_000,
        body: r#"{"status":{"id":3,"description":"Accepted"}}"#.to_string(),
    }])
    .await;
    let client = client_for(&server);
    let cancel = Arc::new(AtomicBool::new(false));

    let trigger = {
        let cancel = Arc::clone(&cancel);
        tokio::spawn(async move {
            sleep(Duration::from_millis(100)).await;
            cancel.store(true, Ordering::Release);
        })
    };

    let error = client
        .submit(&SubmissionRequest::new(71, "print(1)", ""), Some(&cancel))
        .await
        .expect_err("cancelled submission should fail");

    assert!(matches!(error, JudgeApiError::Cancelled));
    let _ = trigger.await;

    server.shutdown();
}

async fn serve_one(
    mut socket: TcpStream,
    scripts: Arc<Vec<ScriptedResponse>>,
    request_count: Arc<AtomicUsize>,
    bodies: Arc<Mutex<Vec<String>>>,
) {
    let Ok(body) = read_request(&mut socket).await else {
        return;
    };
    bodies.lock().expect("bodies lock").push(body);

    let index = request_count.fetch_add(1, Ordering::AcqRel);
    let response = scripts
        .get(index)
        .cloned()
        .unwrap_or_else(|| respond(500, r#"{"error":"unexpected request"}"#));

    if response.delay_ms > 0 {
        sleep(Duration::from_millis(response.delay_ms)).await;
    }

    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        status_reason(response.status),
        response.body.len(),
    );

    if socket.write_all(head.as_bytes()).await.is_err() {
        return;
    }
    let _ = socket.write_all(response.body.as_bytes()).await;
    let _ = socket.shutdown().await;
}

async fn read_request(socket: &mut TcpStream) -> std::io::Result<String> {
    let mut request = Vec::new();
    let mut buffer = [0_u8; 2048];

    let header_end = loop {
        let n = socket.read(&mut buffer).await?;
        if n == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        request.extend_from_slice(&buffer[..n]);
        if let Some(position) = find_header_end(&request) {
            break position;
        }
    };

    let head = String::from_utf8_lossy(&request[..header_end]).to_ascii_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = header_end + 4;
    while request.len() < body_start + content_length {
        let n = socket.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        request.extend_from_slice(&buffer[..n]);
    }

    let end = request.len().min(body_start + content_length);
    Ok(String::from_utf8_lossy(&request[body_start..end]).into_owned())
}

fn find_header_end(bytes: &[u8]) -> Option<usize> {
    bytes.windows(4).position(|window| window == b"\r\n\r\n")
}

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
