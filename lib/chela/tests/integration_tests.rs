//! End-to-end tests for the pipeline over `HyperTransport` using wiremock.

use assert2::check;
use chela::{HyperTransport, MiddlewareStack, RequestOptions, RequestPipeline};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn endpoint(server: &MockServer, route: &str) -> Url {
    Url::parse(&format!("{}{route}", server.uri())).expect("url")
}

#[tokio::test]
async fn get_round_trip() {
    let mock_server = MockServer::start().await;

    let document = json!({
        "data": {
            "id": "1",
            "type": "articles",
            "attributes": {"title": "JSON:API paints my bikeshed!"}
        }
    });

    Mock::given(method("GET"))
        .and(path("/articles/1"))
        .and(header("Accept", "application/vnd.api+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&document))
        .mount(&mock_server)
        .await;

    let pipeline = RequestPipeline::new(HyperTransport::new());

    let decorated = pipeline
        .get(endpoint(&mock_server, "/articles/1"), RequestOptions::new())
        .await
        .expect("response");

    check!(decorated.status() == 200);
    check!(decorated.document() == Some(&document));
}

#[tokio::test]
async fn post_round_trip_sends_document() {
    let mock_server = MockServer::start().await;

    let outgoing = json!({
        "data": {"type": "articles", "attributes": {"title": "new"}}
    });
    let created = json!({
        "data": {"id": "7", "type": "articles", "attributes": {"title": "new"}}
    });

    Mock::given(method("POST"))
        .and(path("/articles"))
        .and(header("Content-Type", "application/vnd.api+json"))
        .and(body_json(&outgoing))
        .respond_with(ResponseTemplate::new(201).set_body_json(&created))
        .mount(&mock_server)
        .await;

    let pipeline = RequestPipeline::new(HyperTransport::new());

    let decorated = pipeline
        .post(
            endpoint(&mock_server, "/articles"),
            &outgoing,
            RequestOptions::new(),
        )
        .await
        .expect("created");

    check!(decorated.status() == 201);
    check!(decorated.document() == Some(&created));
}

#[tokio::test]
async fn patch_round_trip() {
    let mock_server = MockServer::start().await;

    let outgoing = json!({
        "data": {"id": "1", "type": "articles", "attributes": {"title": "renamed"}}
    });

    Mock::given(method("PATCH"))
        .and(path("/articles/1"))
        .and(body_json(&outgoing))
        .respond_with(ResponseTemplate::new(200).set_body_json(&outgoing))
        .mount(&mock_server)
        .await;

    let pipeline = RequestPipeline::new(HyperTransport::new());

    let decorated = pipeline
        .patch(
            endpoint(&mock_server, "/articles/1"),
            &outgoing,
            RequestOptions::new(),
        )
        .await
        .expect("updated");

    check!(decorated.document() == Some(&outgoing));
}

#[tokio::test]
async fn delete_with_no_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/articles/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let pipeline = RequestPipeline::new(HyperTransport::new());

    let decorated = pipeline
        .delete(endpoint(&mock_server, "/articles/1"), RequestOptions::new())
        .await
        .expect("deleted");

    check!(decorated.status() == 204);
    check!(decorated.document().is_none());
}

#[tokio::test]
async fn not_found_is_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles/999"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"errors": [{"title": "gone"}]})),
        )
        .mount(&mock_server)
        .await;

    let pipeline = RequestPipeline::new(HyperTransport::new());

    let err = pipeline
        .get(endpoint(&mock_server, "/articles/999"), RequestOptions::new())
        .await
        .expect_err("missing record");

    check!(err.to_string() == "record not found");
    check!(err.is_not_found());
}

#[tokio::test]
async fn server_error_is_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"data": []})))
        .mount(&mock_server)
        .await;

    let pipeline = RequestPipeline::new(HyperTransport::new());

    let err = pipeline
        .get(endpoint(&mock_server, "/articles"), RequestOptions::new())
        .await
        .expect_err("server blew up");

    check!(err.to_string() == "Server Error");
    check!(err.status() == Some(500));
}

#[tokio::test]
async fn validation_errors_are_a_valid_outcome() {
    let mock_server = MockServer::start().await;

    let errors = json!({"errors": [{"title": "Invalid", "detail": "title is required"}]});

    Mock::given(method("POST"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(422).set_body_json(&errors))
        .mount(&mock_server)
        .await;

    let pipeline = RequestPipeline::new(HyperTransport::new());

    let decorated = pipeline
        .post(
            endpoint(&mock_server, "/articles"),
            &json!({"data": {"type": "articles"}}),
            RequestOptions::new(),
        )
        .await
        .expect("422 carries the validation payload");

    check!(decorated.status() == 422);
    check!(decorated.document() == Some(&errors));
}

#[tokio::test]
async fn non_json_body_is_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>offline</html>"))
        .mount(&mock_server)
        .await;

    let pipeline = RequestPipeline::new(HyperTransport::new());

    let err = pipeline
        .get(endpoint(&mock_server, "/articles"), RequestOptions::new())
        .await
        .expect_err("body is HTML");

    check!(err.to_string().starts_with("invalid json:"));
}

#[tokio::test]
async fn before_fetch_rejection_makes_no_network_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let middleware =
        MiddlewareStack::new().with_before_fetch(|_request| Err("not on my watch".into()));
    let pipeline = RequestPipeline::new(HyperTransport::new()).with_middleware(middleware);

    let err = pipeline
        .get(endpoint(&mock_server, "/articles"), RequestOptions::new())
        .await
        .expect_err("hook rejected the call");

    check!(err.is_pre_fetch());
}

#[tokio::test]
async fn after_fetch_hook_sees_parsed_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&mock_server)
        .await;

    let middleware = MiddlewareStack::new().with_after_fetch(|response, document| {
        if response.status() == 200 && document.get("data").is_some() {
            Ok(())
        } else {
            Err("unexpected payload".into())
        }
    });
    let pipeline = RequestPipeline::new(HyperTransport::new()).with_middleware(middleware);

    pipeline
        .get(endpoint(&mock_server, "/articles"), RequestOptions::new())
        .await
        .expect("hook accepted the payload");
}
