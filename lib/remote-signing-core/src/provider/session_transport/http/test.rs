use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use similar_asserts::assert_eq;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use url::Url;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::HttpSessionTransport;
use crate::model::signing_session::{HashType, SessionId};
use crate::proto::http_client::StatusCode;
use crate::proto::http_client::reqwest_client::ReqwestClient;
use crate::provider::session_transport::SessionTransport;
use crate::provider::session_transport::dto::{
    CertificateRequest, CertificateValue, EndResult, Interaction, SessionResult,
    SessionStatusResponse, SignatureRequest, SignatureValue,
};
use crate::provider::session_transport::error::{TransportError, TransportOperation};

const RELYING_PARTY_UUID: &str = "00000000-0000-0000-0000-000000000000";

fn transport(base_url: &str) -> HttpSessionTransport {
    HttpSessionTransport::new(
        Url::parse(base_url).unwrap(),
        Arc::new(ReqwestClient::default()),
    )
}

fn certificate_request() -> CertificateRequest {
    CertificateRequest {
        relying_party_uuid: Uuid::parse_str(RELYING_PARTY_UUID).unwrap(),
        relying_party_name: "DEMO".to_string(),
        certificate_level: "QUALIFIED".to_string(),
    }
}

fn session_id(value: &str) -> SessionId {
    SessionId::new(value).unwrap()
}

#[tokio::test]
async fn test_get_certificate_starts_certificate_choice_session() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/certificatechoice/etsi/PNOEE-30303039914"))
        .and(body_partial_json(json!({
            "relyingPartyUUID": RELYING_PARTY_UUID,
            "relyingPartyName": "DEMO",
            "certificateLevel": "QUALIFIED",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sessionID": "de305d54-75b4-431b-adb2-eb6b9e546014"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = transport(&format!("{}/v2/", mock_server.uri()))
        .get_certificate("PNOEE-30303039914", certificate_request())
        .await
        .unwrap();

    assert_eq!(
        response.session_id,
        Some(session_id("de305d54-75b4-431b-adb2-eb6b9e546014"))
    );
}

#[tokio::test]
async fn test_get_certificate_without_session_id() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sessionID": "" })))
        .mount(&mock_server)
        .await;

    let response = transport(&mock_server.uri())
        .get_certificate("PNOEE-30303039914", certificate_request())
        .await
        .unwrap();

    assert_eq!(response.session_id, None);
}

#[tokio::test]
async fn test_get_certificate_rejected_status_keeps_operation() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "type": "about:blank",
            "title": "Not Found",
            "status": 404
        })))
        .mount(&mock_server)
        .await;

    let error = transport(&mock_server.uri())
        .get_certificate("PNOEE-30303039914", certificate_request())
        .await
        .unwrap_err();

    match error {
        TransportError::Status {
            status,
            operation,
            detail,
        } => {
            assert_eq!(status, StatusCode(404));
            assert_eq!(operation, TransportOperation::CertificateChoice);
            assert_eq!(detail.as_deref(), Some("Not Found"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_session_status_running() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/session/abc"))
        .and(query_param("timeoutMs", "5000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "state": "RUNNING" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = transport(&mock_server.uri())
        .get_session_status(&session_id("abc"), Duration::from_millis(5000))
        .await
        .unwrap();

    assert_eq!(response, SessionStatusResponse::Running);
}

#[tokio::test]
async fn test_get_session_status_complete_with_certificate() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/session/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "COMPLETE",
            "result": {
                "endResult": "OK",
                "documentNumber": "PNOEE-30303039914-MOCK-Q"
            },
            "cert": {
                "value": "MIIBdGVzdA==",
                "certificateLevel": "QUALIFIED"
            }
        })))
        .mount(&mock_server)
        .await;

    let response = transport(&mock_server.uri())
        .get_session_status(&session_id("abc"), Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(
        response,
        SessionStatusResponse::Complete(SessionResult {
            end_result: EndResult::Ok,
            document_number: Some("PNOEE-30303039914-MOCK-Q".to_string()),
            certificate: Some(CertificateValue {
                value: "MIIBdGVzdA==".to_string(),
                certificate_level: Some("QUALIFIED".to_string()),
            }),
            signature: None,
        })
    );
}

#[tokio::test]
async fn test_get_session_status_complete_with_refusal_and_signature() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "COMPLETE",
            "result": { "endResult": "USER_REFUSED_DISPLAYTEXTANDPIN" },
            "signature": { "value": "c2lnbmF0dXJl", "algorithm": "sha512WithRSAEncryption" }
        })))
        .mount(&mock_server)
        .await;

    let response = transport(&mock_server.uri())
        .get_session_status(&session_id("abc"), Duration::from_secs(5))
        .await
        .unwrap();

    let SessionStatusResponse::Complete(result) = response else {
        panic!("expected complete session");
    };
    assert_eq!(result.end_result, EndResult::UserRefusedDisplayTextAndPin);
    assert_eq!(
        result.signature,
        Some(SignatureValue {
            value: "c2lnbmF0dXJl".to_string(),
            algorithm: Some("sha512WithRSAEncryption".to_string()),
        })
    );
}

#[tokio::test]
async fn test_get_session_status_unknown_end_result() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "COMPLETE",
            "result": { "endResult": "SOMETHING_NEW" }
        })))
        .mount(&mock_server)
        .await;

    let response = transport(&mock_server.uri())
        .get_session_status(&session_id("abc"), Duration::from_secs(5))
        .await
        .unwrap();

    let SessionStatusResponse::Complete(result) = response else {
        panic!("expected complete session");
    };
    assert_eq!(
        result.end_result,
        EndResult::Unknown("SOMETHING_NEW".to_string())
    );
}

#[tokio::test]
async fn test_get_session_status_complete_without_result_is_invalid() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "state": "COMPLETE" })))
        .mount(&mock_server)
        .await;

    let error = transport(&mock_server.uri())
        .get_session_status(&session_id("abc"), Duration::from_secs(5))
        .await
        .unwrap_err();

    assert!(matches!(error, TransportError::Response(_)));
}

#[tokio::test]
async fn test_get_session_status_malformed_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&mock_server)
        .await;

    let error = transport(&mock_server.uri())
        .get_session_status(&session_id("abc"), Duration::from_secs(5))
        .await
        .unwrap_err();

    assert!(matches!(error, TransportError::Response(_)));
}

#[tokio::test]
async fn test_create_signature_sends_interactions() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signature/document/PNOEE-30303039914-MOCK-Q"))
        .and(body_partial_json(json!({
            "relyingPartyUUID": RELYING_PARTY_UUID,
            "hash": "aGFzaA==",
            "hashType": "SHA256",
            "allowedInteractionsOrder": [
                { "type": "confirmationMessage", "displayText200": "Sign contract.asice" },
                { "type": "displayTextAndPIN", "displayText60": "Sign contract.asice" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sessionID": "sig" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = transport(&mock_server.uri())
        .create_signature(
            "PNOEE-30303039914-MOCK-Q",
            SignatureRequest {
                relying_party_uuid: Uuid::parse_str(RELYING_PARTY_UUID).unwrap(),
                relying_party_name: "DEMO".to_string(),
                certificate_level: "QUALIFIED".to_string(),
                hash: "aGFzaA==".to_string(),
                hash_type: HashType::Sha256,
                allowed_interactions_order: vec![
                    Interaction::confirmation_message("Sign contract.asice"),
                    Interaction::display_text_and_pin("Sign contract.asice"),
                ],
            },
        )
        .await
        .unwrap();

    assert_eq!(response.session_id, Some(session_id("sig")));
}

#[tokio::test]
async fn test_create_signature_too_many_requests() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let error = transport(&mock_server.uri())
        .create_signature(
            "PNOEE-30303039914-MOCK-Q",
            SignatureRequest {
                relying_party_uuid: Uuid::nil(),
                relying_party_name: "DEMO".to_string(),
                certificate_level: "QUALIFIED".to_string(),
                hash: "aGFzaA==".to_string(),
                hash_type: HashType::Sha512,
                allowed_interactions_order: vec![],
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        TransportError::Status {
            status: StatusCode(429),
            operation: TransportOperation::Signature,
            detail: None,
        }
    ));
}

#[tokio::test]
async fn test_unreachable_backend_is_connection_error() {
    let error = transport("http://127.0.0.1:1/")
        .get_certificate("PNOEE-30303039914", certificate_request())
        .await
        .unwrap_err();

    assert!(matches!(error, TransportError::Connection(_)));
}

#[tokio::test]
async fn test_failed_handshake_is_tls_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            stream
                .write_all(b"HTTP/1.1 400 Bad Request\r\ncontent-length: 0\r\n\r\n")
                .await
                .ok();
        }
    });

    let error = transport(&format!("https://127.0.0.1:{port}/v2/"))
        .get_certificate("PNOEE-30303039914", certificate_request())
        .await
        .unwrap_err();

    assert!(matches!(error, TransportError::Tls(_)), "{error:?}");
}

#[test]
fn test_display_text_is_truncated_on_char_boundary() {
    let text = "õ".repeat(70);

    let Interaction::DisplayTextAndPin { display_text_60 } =
        Interaction::display_text_and_pin(&text)
    else {
        panic!("unexpected interaction");
    };

    assert_eq!(display_text_60.chars().count(), 60);
}
