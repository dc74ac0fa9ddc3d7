use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use nonfollow::{
    fetch_all_relations, Checker, Error, GithubClient, RelationKind, StatusCode, Terminal,
};

/// A request as seen by the fake api.
#[derive(Debug, Clone)]
struct Seen {
    path: String,
    query: HashMap<String, String>,
    // lowercased request head
    head: String,
}

type Log = Arc<Mutex<Vec<Seen>>>;

/// Serve canned responses, one connection per request. `respond` maps a path and page number
/// to a status code and a body.
async fn serve<F>(respond: F) -> (String, Log)
where
    F: Fn(&str, u32) -> (u16, String) + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log = Log::default();
    let seen = log.clone();

    tokio::spawn(async move {
        loop {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let head = String::from_utf8_lossy(&buf).to_lowercase();
            let target = head.split_whitespace().nth(1).unwrap_or("/").to_string();
            let (path, query) = target.split_once('?').unwrap_or((target.as_str(), ""));
            let query: HashMap<String, String> = query
                .split('&')
                .filter_map(|kv| kv.split_once('='))
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            let page = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);

            let (code, body) = respond(path, page);
            seen.lock().unwrap().push(Seen {
                path: path.to_string(),
                query,
                head,
            });

            let reason = StatusCode::from_u16(code)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown");
            let res = format!(
                "HTTP/1.1 {code} {reason}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(res.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
        }
    });

    (format!("http://{addr}"), log)
}

fn page_of(logins: &[String]) -> String {
    let entries: Vec<_> = logins
        .iter()
        .map(|login| json!({ "login": login, "id": 1, "type": "User" }))
        .collect();
    serde_json::to_string(&entries).unwrap()
}

fn logins(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn client(url: &str) -> GithubClient {
    GithubClient::builder().api_url(url).build().unwrap()
}

#[tokio::test]
async fn fetches_every_page() {
    let first: Vec<String> = (0..100).map(|i| format!("user{i}")).collect();
    let (url, log) = serve(move |_path, page| match page {
        1 => (200, page_of(&first)),
        2 => (200, page_of(&logins(&["last0", "last1"]))),
        _ => (200, "[]".to_string()),
    })
    .await;

    let list = fetch_all_relations(&client(&url), "octo", RelationKind::Followers, None)
        .await
        .unwrap();

    assert_eq!(list.len(), 102);
    assert_eq!(list[0].login, "user0");
    assert_eq!(list[99].login, "user99");
    assert_eq!(list[101].login, "last1");

    let seen = log.lock().unwrap().clone();
    assert_eq!(seen.len(), 3);
    for (i, req) in seen.iter().enumerate() {
        assert_eq!(req.path, "/users/octo/followers");
        assert_eq!(req.query["per_page"], "100");
        assert_eq!(req.query["page"], (i + 1).to_string());
    }
}

#[tokio::test]
async fn non_success_status() {
    let (url, log) = serve(|_path, _page| (404, r#"{"message":"Not Found"}"#.to_string())).await;

    let err = fetch_all_relations(&client(&url), "ghost", RelationKind::Following, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Status { kind: RelationKind::Following, status } if status == StatusCode::NOT_FOUND
    ));
    assert_eq!(err.to_string(), "Error fetching following: Not Found");
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_page() {
    let (url, _log) = serve(|_path, _page| (200, r#"{"login":"octo"}"#.to_string())).await;

    let err = fetch_all_relations(&client(&url), "octo", RelationKind::Followers, None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Http { kind: RelationKind::Followers, .. }));
}

#[tokio::test]
async fn check_end_to_end() {
    let (url, log) = serve(|path, page| match (path, page) {
        ("/users/octo/followers", 1) => (200, page_of(&logins(&["a", "b"]))),
        ("/users/octo/following", 1) => (200, page_of(&logins(&["b", "c", "d"]))),
        _ => (200, "[]".to_string()),
    })
    .await;

    let client = GithubClient::builder()
        .api_url(&url)
        .token(Some("s3cret".to_string()))
        .build()
        .unwrap();
    let checker = Checker::builder(client, Terminal::new(Vec::new(), Vec::new())).build();

    let res = checker.compute_non_followers("octo").await.unwrap().unwrap();
    assert_eq!(res.logins().collect::<Vec<_>>(), ["c", "d"]);
    assert!(checker.renderer().take_error().is_none());

    let seen = log.lock().unwrap().clone();
    let paths: Vec<_> = seen.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(
        paths,
        [
            "/users/octo/followers",
            "/users/octo/followers",
            "/users/octo/following",
            "/users/octo/following",
        ]
    );
    let head = &seen[0].head;
    assert!(head.contains("authorization: bearer s3cret"));
    assert!(head.contains("user-agent: nonfollow/"));
    assert!(head.contains("accept: application/vnd.github+json"));
}
