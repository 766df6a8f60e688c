//! End-to-end tests against a mock NextSMS gateway.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nextsms::{
    Credentials, MessageText, NextSmsClient, NextSmsError, RawPhoneNumber, Recipients, SendBulk,
    SendSms, SenderId,
};

fn client_for(server: &MockServer) -> NextSmsClient {
    NextSmsClient::builder()
        .credentials(Credentials::new("user", "pass").unwrap())
        .base_url(server.uri())
        .build()
        .unwrap()
}

fn phone(raw: &str) -> RawPhoneNumber {
    RawPhoneNumber::new(raw).unwrap()
}

#[tokio::test]
async fn send_reaches_single_endpoint_with_basic_auth() {
    let server = MockServer::start().await;
    let gateway = json!({
        "messages": [{
            "to": "255757294146",
            "status": { "groupId": 18, "groupName": "PENDING", "id": 51, "name": "ENROUTE (SENT)" },
            "messageId": "28089492984101631440",
            "smsCount": 1
        }]
    });

    Mock::given(method("POST"))
        .and(path("/api/sms/v1/text/single"))
        .and(header("Authorization", "Basic dXNlcjpwYXNz"))
        .and(header("Accept", "application/json"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "from": "NEXTSMS",
            "to": "255757294146",
            "text": "habari",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gateway.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request =
        SendSms::with_default_sender(phone("255757294146"), MessageText::new("habari").unwrap());

    let response = client.send(request).await.unwrap();
    assert_eq!(response, gateway);
}

#[tokio::test]
async fn sandbox_bulk_reaches_test_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/sms/v1/test/text/multi"))
        .and(body_json(json!({
            "messages": [
                { "from": "SHOP", "to": ["255700000001", "255700000002"], "text": "sale" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.set_sandbox(true);

    let request = SendBulk::new(vec![SendSms::new(
        SenderId::new("SHOP").unwrap(),
        Recipients::many(vec![phone("255700000001"), phone("255700000002")]).unwrap(),
        MessageText::new("sale").unwrap(),
    )]);

    let response = client.send_bulk(request).await.unwrap();
    assert_eq!(response, json!({ "ok": true }));
}

#[tokio::test]
async fn gateway_errors_surface_as_http_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/sms/v1/text/single"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request =
        SendSms::with_default_sender(phone("255757294146"), MessageText::new("habari").unwrap());

    let err = client.send(request).await.unwrap_err();
    assert!(matches!(
        err,
        NextSmsError::HttpStatus {
            status: 401,
            body: Some(ref body)
        } if body == "Unauthorized"
    ));
}

#[tokio::test]
async fn gateway_json_errors_are_returned_verbatim() {
    let server = MockServer::start().await;
    let gateway = json!({
        "requestError": {
            "serviceException": { "messageId": "UNAUTHORIZED", "text": "Invalid login details" }
        }
    });

    Mock::given(method("POST"))
        .and(path("/api/sms/v1/text/single"))
        .respond_with(ResponseTemplate::new(401).set_body_json(gateway.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request =
        SendSms::with_default_sender(phone("255757294146"), MessageText::new("habari").unwrap());

    let response = client.send(request).await.unwrap();
    assert_eq!(response, gateway);
}

#[tokio::test]
async fn uninitialized_client_never_contacts_gateway() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = NextSmsClient::builder()
        .base_url(server.uri())
        .build()
        .unwrap();
    let err = client.send_bulk(SendBulk::default()).await.unwrap_err();
    assert!(matches!(err, NextSmsError::NotInitialized));
}
