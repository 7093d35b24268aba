mod common;

use common::{sample_document, TestApi, ERROR_BODY, TEST_DOCUMENT_ID};
use onfido_client::ClientError;
use reqwest::StatusCode;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn get_document_fails_on_non_ok_response() {
    let api = TestApi::spawn().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string(ERROR_BODY))
        .mount(&api.server)
        .await;

    let err = api
        .client
        .get_document("")
        .await
        .expect_err("expected server to return non ok response");

    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
}

#[tokio::test]
async fn get_document_returns_document() {
    let api = TestApi::spawn().await;
    let expected = sample_document();

    Mock::given(method("GET"))
        .and(path(format!("/documents/{}", TEST_DOCUMENT_ID)))
        .and(header("authorization", TestApi::auth_header().as_str()))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&expected))
        .expect(1)
        .mount(&api.server)
        .await;

    let document = api
        .client
        .get_document(TEST_DOCUMENT_ID)
        .await
        .expect("Failed to get document");

    assert_eq!(document.id, expected.id);
    assert_eq!(document.applicant_id, expected.applicant_id);
    assert_eq!(document.href, expected.href);
    assert_eq!(document.download_href, expected.download_href);
    assert_eq!(document.file_name, expected.file_name);
    assert_eq!(document.file_type, expected.file_type);
    assert_eq!(document.file_size, expected.file_size);
    assert_eq!(document.document_type, expected.document_type);
    assert_eq!(document.side, expected.side);
}

#[tokio::test]
async fn get_document_fails_on_malformed_json() {
    let api = TestApi::spawn().await;
    Mock::given(method("GET"))
        .and(path(format!("/documents/{}", TEST_DOCUMENT_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&api.server)
        .await;

    let err = api.client.get_document(TEST_DOCUMENT_ID).await.unwrap_err();

    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn get_document_keeps_id_inside_one_path_segment() {
    let api = TestApi::spawn().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&sample_document()))
        .expect(2)
        .mount(&api.server)
        .await;

    api.client
        .get_document("../applicants/x")
        .await
        .expect("Failed to get document");
    api.client
        .get_document("a?b")
        .await
        .expect("Failed to get document");

    let requests = api.server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.path(), "/documents/..%2Fapplicants%2Fx");
    assert_eq!(requests[1].url.path(), "/documents/a%3Fb");
    assert_eq!(requests[1].url.query(), None);
}

#[tokio::test]
async fn get_document_rejects_dot_segment_ids() {
    let api = TestApi::spawn().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&sample_document()))
        .expect(0)
        .mount(&api.server)
        .await;

    let err = api.client.get_document("..").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidUrl(_)));
}
