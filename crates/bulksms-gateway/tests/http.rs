#![cfg(feature = "http")]

use bulksms_core::{Contact, ContactStatus, GatewayConfig, GatewayMode};
use bulksms_gateway::{send_bulk, HttpTransport};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// Accepts one connection, answers with `status` and `body`, and returns the raw request.
fn one_shot_server(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let endpoint = format!(
        "http://{}/version1/messaging",
        listener.local_addr().expect("addr")
    );
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let request = read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).expect("write");
        request
    });
    (endpoint, handle)
}

fn read_request(stream: &mut impl Read) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let n = stream.read(&mut buf).expect("read");
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
        let text = String::from_utf8_lossy(&data).to_string();
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if data.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&data).to_string()
}

fn config(endpoint: String) -> GatewayConfig {
    GatewayConfig {
        mode: GatewayMode::Live,
        username: "acme".to_string(),
        api_key: "atsk_secret".to_string(),
        sender_id: "ACME".to_string(),
        endpoint: Some(endpoint),
        timeout_secs: 5,
    }
}

fn contacts() -> Vec<Contact> {
    vec![
        Contact::pending(
            "Jane".to_string(),
            "+256712345678".to_string(),
            "0712345678".to_string(),
        ),
        Contact::pending(
            "John".to_string(),
            "+256772000111".to_string(),
            "0772000111".to_string(),
        ),
        Contact::pending(
            "Silent".to_string(),
            "+256701000222".to_string(),
            "0701000222".to_string(),
        ),
    ]
}

#[test]
fn http_send_reconciles_gateway_receipts() {
    let (endpoint, server) = one_shot_server(
        "201 Created",
        r#"{"SMSMessageData":{"Message":"Sent to 1/3 Total Cost: UGX 35.0000","Recipients":[{"statusCode":101,"number":"+256712345678","status":"Success","cost":"UGX 35.0000","messageId":"ATXid_1"},{"statusCode":102,"number":"+256772000111","status":"InvalidSenderId","cost":"0","messageId":"None"}]}}"#,
    );
    let config = config(endpoint);
    let transport = HttpTransport::from_config(&config).expect("transport");

    let report = send_bulk(&transport, "Hello & welcome", &contacts(), &config).expect("send");
    let request = server.join().expect("server thread");

    assert!(request.starts_with("POST /version1/messaging"));
    assert!(request.to_ascii_lowercase().contains("apikey: atsk_secret"));
    assert!(request.contains("username=acme"));
    assert!(request.contains("from=ACME"));
    assert!(request.contains("to=%2B256712345678%2C%2B256772000111%2C%2B256701000222"));
    assert!(request.contains("message=Hello+%26+welcome"));

    assert_eq!(report.contacts[0].status, ContactStatus::Sent);
    assert_eq!(report.contacts[1].status, ContactStatus::Failed);
    assert_eq!(report.contacts[1].error.as_deref(), Some("InvalidSenderId"));
    assert_eq!(report.contacts[2].status, ContactStatus::Pending);
    assert_eq!(report.receipts.len(), 2);
    assert_eq!(
        report.summary.as_deref(),
        Some("Sent to 1/3 Total Cost: UGX 35.0000")
    );
}

#[test]
fn http_error_status_fails_whole_batch() {
    let (endpoint, server) = one_shot_server("401 Unauthorized", r#"{"error":"bad key"}"#);
    let config = config(endpoint);
    let transport = HttpTransport::from_config(&config).expect("transport");

    let report = send_bulk(&transport, "Hello", &contacts(), &config).expect("send");
    server.join().expect("server thread");

    let error = report.transport_error.expect("transport error");
    assert!(error.contains("401"));
    for contact in &report.contacts {
        assert_eq!(contact.status, ContactStatus::Failed);
        assert_eq!(contact.error.as_deref(), Some(error.as_str()));
    }
}

#[test]
fn unreachable_gateway_fails_whole_batch() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let endpoint = format!("http://{}/messaging", listener.local_addr().expect("addr"));
    drop(listener);

    let config = config(endpoint);
    let transport = HttpTransport::from_config(&config).expect("transport");
    let report = send_bulk(&transport, "Hello", &contacts(), &config).expect("send");

    assert!(report.transport_error.is_some());
    assert!(report
        .contacts
        .iter()
        .all(|contact| contact.status == ContactStatus::Failed));
}

#[test]
fn undecodable_body_fails_whole_batch() {
    let (endpoint, server) = one_shot_server("200 OK", "<html>proxy error</html>");
    let config = config(endpoint);
    let transport = HttpTransport::from_config(&config).expect("transport");

    let report = send_bulk(&transport, "Hello", &contacts(), &config).expect("send");
    server.join().expect("server thread");

    let error = report.transport_error.expect("transport error");
    assert!(error.starts_with("invalid gateway response"));
}
