use stayhub_core::error::GENERIC_FAILURE_MESSAGE;
use stayhub_core::{BookingGateway, PropertyGateway};
use stayhub_domain::{PropertyCategory, PropertyDraft};
use stayhub_gateway::HttpGateway;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Serves a single canned response and hands back the raw request.
async fn serve_once(status: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.expect("read");
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&raw).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if raw.len() >= header_end + 4 + length {
                    break;
                }
            }
        }
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.expect("write");
        let _ = tx.send(String::from_utf8_lossy(&raw).to_string());
    });
    (format!("http://{addr}/api"), rx)
}

fn gateway(base_url: String) -> HttpGateway {
    HttpGateway::with_options(
        base_url,
        Some("tok_test".into()),
        std::time::Duration::from_secs(5),
    )
    .expect("client")
}

#[tokio::test]
async fn create_property_posts_payload_and_reads_id() {
    let (url, request) = serve_once("201 Created", r#"{"property":{"_id":"p_77"}}"#).await;
    let mut draft = PropertyDraft::new(PropertyCategory::Villa);
    draft.base.name = "Casa Mar".into();

    let id = gateway(url)
        .create_property(&draft)
        .await
        .expect("create property");
    assert_eq!(id, "p_77");

    let raw = request.await.expect("request captured");
    assert!(raw.starts_with("POST /api/properties HTTP/1.1"));
    assert!(raw.to_ascii_lowercase().contains("authorization: bearer tok_test"));
    assert!(raw.contains("\"propertyType\":\"villa\""));
    assert!(raw.contains("\"name\":\"Casa Mar\""));
}

#[tokio::test]
async fn api_error_message_reaches_the_partner() {
    let (url, _request) =
        serve_once("409 Conflict", r#"{"message":"Property already exists"}"#).await;
    let err = gateway(url)
        .delete_property("p_1")
        .await
        .expect_err("conflict");
    assert_eq!(err.user_message(), "Property already exists");
}

#[tokio::test]
async fn opaque_error_body_falls_back_to_generic_message() {
    let (url, _request) = serve_once("502 Bad Gateway", "<html>upstream down</html>").await;
    let err = gateway(url)
        .list_my_properties()
        .await
        .expect_err("bad gateway");
    assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn bookings_are_read_through_data_envelope() {
    let body = r#"{"data":{"bookings":[{"_id":"b1","propertyName":"Casa Mar","checkIn":"2025-04-01","checkOut":"2025-04-03","guests":2,"totalAmount":18000,"status":"confirmed"}]}}"#;
    let (url, request) = serve_once("200 OK", body).await;

    let bookings = gateway(url).my_bookings().await.expect("bookings");
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].id, "b1");
    assert_eq!(bookings[0].nights(), 2);

    let raw = request.await.expect("request captured");
    assert!(raw.starts_with("GET /api/bookings/mine HTTP/1.1"));
}
