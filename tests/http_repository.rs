use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use pushkind_crm_admin::domain::customer::NewCustomer;
use pushkind_crm_admin::domain::types::{ContactId, CustomerId, CustomerStatus, UserId};
use pushkind_crm_admin::repository::errors::RepositoryError;
use pushkind_crm_admin::repository::{
    ContactReader, ContactWriter, CustomerReader, CustomerWriter, HttpRepository, UserReader,
};

mod common;

use common::customer;

/// Request as seen by the stub backend.
#[derive(Debug, Clone)]
struct Received {
    method: String,
    path: String,
    body: String,
}

impl Received {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Canned answer of the stub backend.
#[derive(Clone)]
struct Reply {
    status: u16,
    body: String,
    /// Advertised length; a value above the body length cuts the body short.
    content_length: Option<usize>,
}

impl Reply {
    fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            content_length: None,
        }
    }
}

type Log = Arc<Mutex<Vec<Received>>>;

/// Starts a one-route HTTP/1.1 stub answering every request with `reply`.
async fn serve(reply: Reply) -> (HttpRepository, Log) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: Log = Arc::default();

    let received = log.clone();
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let (reply, received) = (reply.clone(), received.clone());
            tokio::spawn(async move {
                let _ = answer(socket, reply, received).await;
            });
        }
    });

    let repo = HttpRepository::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap();
    (repo, log)
}

async fn answer(mut socket: TcpStream, reply: Reply, received: Log) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let head_end = loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < head_end + content_length {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
    received.lock().unwrap().push(Received {
        method: request_line.next().unwrap_or_default().to_string(),
        path: request_line.next().unwrap_or_default().to_string(),
        body: String::from_utf8_lossy(&buf[head_end..]).into_owned(),
    });

    let response = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.status,
        reply.content_length.unwrap_or(reply.body.len()),
        reply.body,
    );
    socket.write_all(response.as_bytes()).await?;
    socket.shutdown().await
}

fn only_request(log: &Log) -> Received {
    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1, "expected exactly one request: {log:?}");
    log[0].clone()
}

#[tokio::test]
async fn lists_contacts_with_missing_fields() {
    let (repo, log) = serve(Reply::new(
        200,
        r#"[{"id":1,"name":"Ann","email":null},{"id":2,"name":"Bob","phone":"+1 555"}]"#,
    ))
    .await;

    let contacts = repo.list_contacts().await.unwrap();

    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0].email, None);
    assert_eq!(contacts[1].phone.as_deref(), Some("+1 555"));
    let request = only_request(&log);
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/api/contacts");
}

#[tokio::test]
async fn lists_customers_with_null_status() {
    let (repo, log) = serve(Reply::new(
        200,
        r#"[{"id":1,"name":"Ann","status":"active"},{"id":2,"name":"Bob","status":null}]"#,
    ))
    .await;

    let customers = repo.list_customers().await.unwrap();

    assert_eq!(customers[0].status, CustomerStatus::Active);
    assert_eq!(customers[1].status, CustomerStatus::Pending);
    assert_eq!(only_request(&log).path, "/api/customers");
}

#[tokio::test]
async fn lists_users() {
    let (repo, log) = serve(Reply::new(200, r#"[{"id":3,"name":"Alice"}]"#)).await;

    let users = repo.list_users().await.unwrap();

    assert_eq!(users[0].id, UserId::new(3).unwrap());
    let request = only_request(&log);
    assert_eq!((request.method.as_str(), request.path.as_str()), ("GET", "/api/users"));
}

#[tokio::test]
async fn create_posts_fields_without_id() {
    let (repo, log) = serve(Reply::new(
        201,
        r#"{"id":99,"name":"Dora","company":"Initech","status":"active"}"#,
    ))
    .await;
    let payload = NewCustomer::new(
        "Dora".to_string(),
        None,
        None,
        Some("Initech".to_string()),
        CustomerStatus::Active,
        Some(UserId::new(2).unwrap()),
    );

    let created = repo.create_customer(&payload).await.unwrap();

    assert_eq!(created.id, CustomerId::new(99).unwrap());
    let request = only_request(&log);
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/api/customers");
    let body = request.json();
    assert!(body.get("id").is_none());
    assert_eq!(body["name"], "Dora");
    assert_eq!(body["status"], "active");
    assert_eq!(body["assigned_to"], 2);
}

#[tokio::test]
async fn update_puts_the_full_record() {
    let mut record = customer(7, "Gus", Some("Acme"));
    record.status = CustomerStatus::Inactive;
    let (repo, log) = serve(Reply::new(200, serde_json::to_string(&record).unwrap())).await;

    let updated = repo.update_customer(&record).await.unwrap();

    assert_eq!(updated, record);
    let request = only_request(&log);
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, "/api/customers/7");
    assert_eq!(
        request.json(),
        json!({
            "id": 7,
            "name": "Gus",
            "email": "gus@example.com",
            "phone": null,
            "company": "Acme",
            "status": "inactive",
            "assigned_to": null,
        })
    );
}

#[tokio::test]
async fn status_change_patches_only_the_status() {
    let (repo, log) = serve(Reply::new(
        200,
        r#"{"id":7,"name":"Gus","status":"inactive"}"#,
    ))
    .await;

    let updated = repo
        .update_customer_status(CustomerId::new(7).unwrap(), &CustomerStatus::Inactive)
        .await
        .unwrap();

    assert_eq!(updated.status, CustomerStatus::Inactive);
    let request = only_request(&log);
    assert_eq!(request.method, "PATCH");
    assert_eq!(request.path, "/api/customers/7/status");
    assert_eq!(request.json(), json!({"status": "inactive"}));
}

#[tokio::test]
async fn deletes_use_delete_method() {
    let (repo, log) = serve(Reply::new(204, "")).await;

    repo.delete_contact(ContactId::new(3).unwrap()).await.unwrap();
    repo.delete_customer(CustomerId::new(4).unwrap())
        .await
        .unwrap();

    let log = log.lock().unwrap();
    let calls: Vec<(&str, &str)> = log
        .iter()
        .map(|r| (r.method.as_str(), r.path.as_str()))
        .collect();
    assert_eq!(
        calls,
        vec![("DELETE", "/api/contacts/3"), ("DELETE", "/api/customers/4")]
    );
}

#[tokio::test]
async fn rejected_request_keeps_the_body_as_message() {
    let (repo, _) = serve(Reply::new(409, "customer has open deals")).await;

    let err = repo
        .delete_customer(CustomerId::new(4).unwrap())
        .await
        .unwrap_err();

    match err {
        RepositoryError::Status { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "customer has open deals");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn missing_record_is_not_found() {
    let (repo, _) = serve(Reply::new(404, "no such customer")).await;

    let err = repo
        .update_customer_status(CustomerId::new(5).unwrap(), &CustomerStatus::Active)
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::NotFound));
}

#[tokio::test]
async fn truncated_error_body_falls_back_to_no_details() {
    let (repo, _) = serve(Reply {
        status: 500,
        body: "boo".to_string(),
        content_length: Some(64),
    })
    .await;

    let err = repo.list_contacts().await.unwrap_err();

    assert!(matches!(
        err,
        RepositoryError::Status { status: 500, ref message } if message == "no details"
    ));
}

#[tokio::test]
async fn malformed_list_is_a_decode_error() {
    let (repo, _) = serve(Reply::new(200, r#"[{"id":1}"#)).await;

    let err = repo.list_customers().await.unwrap_err();

    assert!(matches!(err, RepositoryError::DecodeError(_)));
}
