#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end: token endpoint and resource server on one mock server,
//! requests sent through a client built with `with_bearer_auth`.

use std::time::Duration;

use httpmock::prelude::*;
use petfinder_auth::{HttpClientBuilderExt, OAuthClientConfig, SecretString, Token, TokenError};
use petfinder_http::{HttpClient, HttpClientBuilder, HttpClientConfig, HttpError};
use url::Url;

fn config(server: &MockServer) -> OAuthClientConfig {
    OAuthClientConfig {
        token_endpoint: Some(Url::parse(&server.url("/oauth2/token/")).unwrap()),
        client_id: "pf-client".into(),
        client_secret: SecretString::new("pf-secret"),
        refresh_offset: Duration::ZERO,
        http_config: Some(HttpClientConfig::for_testing()),
        ..Default::default()
    }
}

fn client(token: Token) -> HttpClient {
    HttpClientBuilder::with_config(HttpClientConfig::for_testing())
        .with_bearer_auth(token)
        .build()
        .unwrap()
}

#[tokio::test]
async fn token_is_reused_then_refreshed_once_after_expiry() {
    let server = MockServer::start();
    let token_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/oauth2/token/")
            .body_includes("grant_type=client_credentials");
        then.status(200)
            .body(r#"{"token_type":"Bearer","expires_in":1,"access_token":"short-lived"}"#);
    });
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/types")
            .header("authorization", "Bearer short-lived");
        then.status(200).body(r#"{"types":[]}"#);
    });

    let client = client(Token::new(config(&server)).unwrap());

    client.get(&server.url("/v2/types")).send().await.unwrap();
    client.get(&server.url("/v2/types")).send().await.unwrap();
    token_mock.assert_calls(1);

    tokio::time::sleep(Duration::from_millis(1100)).await;

    client.get(&server.url("/v2/types")).send().await.unwrap();
    client.get(&server.url("/v2/types")).send().await.unwrap();
    token_mock.assert_calls(2);
    api_mock.assert_calls(4);
}

#[tokio::test]
async fn concurrent_requests_share_one_token_request() {
    let server = MockServer::start();
    let token_mock = server.mock(|when, then| {
        when.method(POST).path("/oauth2/token/");
        then.status(200)
            .delay(Duration::from_millis(100))
            .body(r#"{"token_type":"Bearer","expires_in":3600,"access_token":"shared"}"#);
    });
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/animals")
            .header("authorization", "Bearer shared");
        then.status(200).body(r#"{"animals":[]}"#);
    });

    let client = client(Token::new(config(&server)).unwrap());
    let url = server.url("/v2/animals");

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let client = client.clone();
            let url = url.clone();
            tokio::spawn(async move { client.get(&url).send().await })
        })
        .collect();

    for handle in handles {
        let resp = handle.await.unwrap().unwrap();
        assert_eq!(resp.status(), http::StatusCode::OK);
    }

    token_mock.assert_calls(1);
    api_mock.assert_calls(16);
}

#[tokio::test]
async fn invalidate_after_unauthorized_fetches_new_token() {
    let server = MockServer::start();
    let mut token_mock = server.mock(|when, then| {
        when.method(POST).path("/oauth2/token/");
        then.status(200).body(r#"{"access_token":"revoked","expires_in":3600}"#);
    });
    let mut rejected = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/types")
            .header("authorization", "Bearer revoked");
        then.status(401);
    });

    let token = Token::new(config(&server)).unwrap();
    let client = client(token.clone());

    let err = client
        .get(&server.url("/v2/types"))
        .send()
        .await
        .unwrap()
        .checked_bytes()
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(http::StatusCode::UNAUTHORIZED));

    token_mock.delete();
    rejected.delete();
    let fresh_mock = server.mock(|when, then| {
        when.method(POST).path("/oauth2/token/");
        then.status(200).body(r#"{"access_token":"fresh","expires_in":3600}"#);
    });
    let accepted = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/types")
            .header("authorization", "Bearer fresh");
        then.status(200);
    });

    token.invalidate();
    client.get(&server.url("/v2/types")).send().await.unwrap();

    fresh_mock.assert_calls(1);
    accepted.assert();
}

#[tokio::test]
async fn token_endpoint_failure_surfaces_as_transport_error() {
    let server = MockServer::start();
    let _token_mock = server.mock(|when, then| {
        when.method(POST).path("/oauth2/token/");
        then.status(500).body("boom");
    });
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/v2/types");
        then.status(200);
    });

    let client = client(Token::new(config(&server)).unwrap());
    let err = client
        .get(&server.url("/v2/types"))
        .send()
        .await
        .unwrap_err();

    match err {
        HttpError::Transport(source) => {
            let token_err = source.downcast_ref::<TokenError>().unwrap();
            assert!(matches!(token_err, TokenError::Http(m) if m.contains("500")));
        }
        other => panic!("expected Transport error, got: {other:?}"),
    }
    api_mock.assert_calls(0);
}
