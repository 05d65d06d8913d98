use reqwest::Client;
use reqwest::StatusCode;
use serde_json::Value;

use crate::assert_response_status_eq;
use crate::http::tests::create_account;
use crate::http::tests::run_http_service;
use crate::http::tests::CLIENT_ID;
use crate::http::tests::CLIENT_SECRET;

#[tokio::test]
async fn test_password_grant() {
    let (base_url, md, _pp) = run_http_service().await.unwrap();
    let token_url = format!("{base_url}/oauth/token");
    let cl = Client::new();
    create_account(&md, "user@mail.com", "password").unwrap();

    // wrong client secret never reaches the grant
    {
        let resp = cl
            .post(&token_url)
            .basic_auth(CLIENT_ID, Some("wrong"))
            .form(&[
                ("grant_type", "password"),
                ("username", "user@mail.com"),
                ("password", "password"),
            ])
            .send()
            .await
            .unwrap();
        let status = resp.status();
        let body: Value = resp.json().await.unwrap();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "invalid_client");
    }

    // missing client credentials as well
    {
        let resp = cl
            .post(&token_url)
            .form(&[
                ("grant_type", "password"),
                ("username", "user@mail.com"),
                ("password", "password"),
            ])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    // good credentials mint a bearer token
    let refresh_token = {
        let resp = cl
            .post(&token_url)
            .basic_auth(CLIENT_ID, Some(CLIENT_SECRET))
            .form(&[
                ("grant_type", "password"),
                ("username", "user@mail.com"),
                ("password", "password"),
            ])
            .send()
            .await
            .unwrap();
        let status = resp.status();
        let body: Value = resp.json().await.unwrap();
        assert_eq!(status, StatusCode::OK, "{body}");
        assert!(!body["access_token"].as_str().unwrap().is_empty());
        assert_eq!(body["token_type"], "bearer");
        assert!(body["expires_in"].as_i64().unwrap() > 0);

        body["refresh_token"].as_str().unwrap().to_string()
    };

    // unknown email and wrong password are indistinguishable to the client
    for (username, password) in [
        ("ghost@mail.com", "password"),
        ("user@mail.com", "wrong password"),
    ] {
        let resp = cl
            .post(&token_url)
            .basic_auth(CLIENT_ID, Some(CLIENT_SECRET))
            .form(&[
                ("grant_type", "password"),
                ("username", username),
                ("password", password),
            ])
            .send()
            .await
            .unwrap();
        let status = resp.status();
        let body: Value = resp.json().await.unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_grant");
    }

    // the refresh grant mints a fresh pair
    {
        let resp = cl
            .post(&token_url)
            .basic_auth(CLIENT_ID, Some(CLIENT_SECRET))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.as_str()),
            ])
            .send()
            .await
            .unwrap();
        let status = resp.status();
        let body: Value = resp.json().await.unwrap();
        assert_eq!(status, StatusCode::OK, "{body}");
        assert!(!body["access_token"].as_str().unwrap().is_empty());
    }

    // a garbage refresh token does not
    {
        let resp = cl
            .post(&token_url)
            .basic_auth(CLIENT_ID, Some(CLIENT_SECRET))
            .form(&[("grant_type", "refresh_token"), ("refresh_token", "nope")])
            .send()
            .await
            .unwrap();
        let status = resp.status();
        let body: Value = resp.json().await.unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_grant");
    }

    // unknown grant types are refused
    {
        let resp = cl
            .post(&token_url)
            .basic_auth(CLIENT_ID, Some(CLIENT_SECRET))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .unwrap();
        let status = resp.status();
        let body: Value = resp.json().await.unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "unsupported_grant_type");
    }
}

#[tokio::test]
async fn test_invalid_bearer_token_is_rejected() {
    let (base_url, _md, _pp) = run_http_service().await.unwrap();
    let cl = Client::new();

    let resp = cl
        .get(format!("{base_url}/api/events"))
        .bearer_auth("not a token")
        .send()
        .await
        .unwrap();

    assert_response_status_eq!(resp, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_index_advertises_the_events_resource() {
    let (base_url, _md, _pp) = run_http_service().await.unwrap();
    let cl = Client::new();

    let resp = cl.get(format!("{base_url}/api")).send().await.unwrap();

    let status = resp.status();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["_links"]["events"]["href"], "/api/events");
}
