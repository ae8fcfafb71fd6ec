use std::sync::Arc;

use docx_pdf_uploader::upload::{ConversionClient, SelectedFile};
use docx_pdf_uploader::{ConversionError, UploaderConfig};
use mockito::{Matcher, Server};

fn config_for(server_url: String, form_fields: Vec<(String, String)>) -> UploaderConfig {
    UploaderConfig {
        server_url,
        form_fields,
        ..UploaderConfig::default()
    }
}

fn contract() -> SelectedFile {
    SelectedFile::from_bytes("contract.docx", Arc::from(&b"PK fake docx payload"[..]))
}

#[tokio::test]
async fn successful_conversion_returns_pdf_bytes() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/convert")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="word_file"; filename="contract.docx""#.to_string()),
            Matcher::Regex("PK fake docx payload".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/pdf")
        .with_body("%PDF-1.7 converted")
        .create_async()
        .await;

    let client = ConversionClient::new(&config_for(server.url(), Vec::new()))
        .expect("client should build");
    let pdf = client
        .convert(&contract())
        .await
        .expect("2xx response should yield the body");

    assert_eq!(pdf, b"%PDF-1.7 converted");
    mock.assert_async().await;
}

#[tokio::test]
async fn extra_form_fields_are_passed_through() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/convert")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="word_file""#.to_string()),
            Matcher::Regex(r#"name="quality"\r\n\r\nhigh\r\n"#.to_string()),
            Matcher::Regex(r#"name="locale"\r\n\r\nen\r\n"#.to_string()),
        ]))
        .with_status(201)
        .with_body("%PDF")
        .create_async()
        .await;

    let fields = vec![
        ("quality".to_string(), "high".to_string()),
        ("locale".to_string(), "en".to_string()),
    ];
    let client = ConversionClient::new(&config_for(server.url(), fields)).unwrap();

    let pdf = client.convert(&contract()).await.unwrap();

    assert_eq!(pdf, b"%PDF");
    mock.assert_async().await;
}

#[tokio::test]
async fn server_error_message_is_surfaced() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/convert")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"bad file"}"#)
        .create_async()
        .await;

    let client = ConversionClient::new(&config_for(server.url(), Vec::new())).unwrap();
    let error = client
        .convert(&contract())
        .await
        .expect_err("500 should fail");

    assert!(matches!(
        &error,
        ConversionError::Server { status: 500, message } if message == "bad file"
    ));
    assert_eq!(error.to_string(), "bad file");
}

#[tokio::test]
async fn unparsable_error_body_falls_back_to_generic_message() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/convert")
        .with_status(500)
        .with_body("<html>Internal Server Error</html>")
        .create_async()
        .await;

    let client = ConversionClient::new(&config_for(server.url(), Vec::new())).unwrap();
    let error = client.convert(&contract()).await.unwrap_err();

    assert_eq!(error.to_string(), "Conversion failed");
}

#[tokio::test]
async fn oversized_rejection_from_server_uses_its_message() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/convert")
        .with_status(413)
        .with_body(r#"{"error":"File too large"}"#)
        .create_async()
        .await;

    let client = ConversionClient::new(&config_for(server.url(), Vec::new())).unwrap();
    let error = client.convert(&contract()).await.unwrap_err();

    assert!(matches!(error, ConversionError::Server { status: 413, .. }));
    assert_eq!(error.to_string(), "File too large");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let client =
        ConversionClient::new(&config_for("http://127.0.0.1:1".to_string(), Vec::new())).unwrap();

    let error = client.convert(&contract()).await.unwrap_err();

    assert!(matches!(error, ConversionError::Transport(_)));
    assert!(error.to_string().starts_with("Request failed: "));
}

#[tokio::test]
async fn missing_source_file_is_reported_before_sending() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/convert")
        .expect(0)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gone.docx");
    std::fs::write(&path, b"PK").unwrap();
    let file = SelectedFile::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let client = ConversionClient::new(&config_for(server.url(), Vec::new())).unwrap();
    let error = client.convert(&file).await.unwrap_err();

    assert!(matches!(error, ConversionError::ReadSource { ref name, .. } if name == "gone.docx"));
    mock.assert_async().await;
}

#[tokio::test]
async fn version_is_read_from_server() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/version")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"version":"1.4.2","build":"abc"}"#)
        .create_async()
        .await;

    let client = ConversionClient::new(&config_for(server.url(), Vec::new())).unwrap();

    assert_eq!(
        client.fetch_version().await.unwrap(),
        Some("1.4.2".to_string())
    );
}

#[tokio::test]
async fn version_without_field_is_none() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/version")
        .with_status(200)
        .with_body(r#"{"name":"converter"}"#)
        .create_async()
        .await;

    let client = ConversionClient::new(&config_for(server.url(), Vec::new())).unwrap();

    assert_eq!(client.fetch_version().await.unwrap(), None);
}
