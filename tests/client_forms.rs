use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopfront::client::{
    AuthApi, FormPhase, LoginForm, MemoryTokenStore, Route, SignupForm, TokenStore,
};
use shopfront::client::forms::{REDIRECT_DELAY, TOKEN_KEY};

fn filled_signup_form() -> SignupForm {
    let mut form = SignupForm::new();
    form.first_name = "A".into();
    form.last_name = "B".into();
    form.email = "a@b.com".into();
    form.password = "secret".into();
    form.confirm_password = "secret".into();
    form
}

fn auth_body() -> serde_json::Value {
    json!({
        "token": "signed.token.value",
        "user": {"firstName": "A", "lastName": "B", "email": "a@b.com"}
    })
}

#[tokio::test]
async fn mismatched_confirm_never_reaches_the_network() {
    let server = MockServer::start().await;
    let api = AuthApi::new(server.uri());

    let mut form = filled_signup_form();
    form.confirm_password = "different".into();
    form.submit(&api).await;

    assert_eq!(form.phase(), FormPhase::Failed);
    assert_eq!(form.message(), Some("Passwords do not match."));
    let requests = server.received_requests().await.expect("recording on");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn signup_probes_then_signs_up_and_schedules_login_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/check-email"))
        .and(body_json(json!({"email": "a@b.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"exists": false})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .respond_with(ResponseTemplate::new(201).set_body_json(auth_body()))
        .expect(1)
        .mount(&server)
        .await;

    let api = AuthApi::new(server.uri());
    let mut form = filled_signup_form();
    form.submit(&api).await;

    assert_eq!(form.phase(), FormPhase::Success);
    assert_eq!(form.message(), Some("Signup successful! Redirecting..."));
    let redirect = form.redirect().expect("redirect scheduled");
    assert_eq!(redirect.route, Route::Login);
    assert_eq!(redirect.delay, REDIRECT_DELAY);
}

#[tokio::test]
async fn existing_email_probe_blocks_the_signup_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/check-email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"exists": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .respond_with(ResponseTemplate::new(201).set_body_json(auth_body()))
        .expect(0)
        .mount(&server)
        .await;

    let api = AuthApi::new(server.uri());
    let mut form = filled_signup_form();
    form.submit(&api).await;

    assert_eq!(form.phase(), FormPhase::Failed);
    assert!(form.email_invalid());
    assert_eq!(
        form.message(),
        Some("Email already exists. Please use a different email.")
    );
}

#[tokio::test]
async fn signup_surfaces_the_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/check-email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"exists": false})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"msg": "User already exists"})),
        )
        .mount(&server)
        .await;

    let api = AuthApi::new(server.uri());
    let mut form = filled_signup_form();
    form.submit(&api).await;

    assert_eq!(form.phase(), FormPhase::Failed);
    assert_eq!(form.message(), Some("User already exists"));
}

#[tokio::test]
async fn login_stores_the_token_and_schedules_products_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body()))
        .expect(1)
        .mount(&server)
        .await;

    let api = AuthApi::new(server.uri());
    let tokens = MemoryTokenStore::new();
    let mut form = LoginForm::new();
    form.email = "a@b.com".into();
    form.password = "secret".into();
    form.submit(&api, &tokens).await;

    assert_eq!(form.phase(), FormPhase::Success);
    assert_eq!(tokens.get(TOKEN_KEY).as_deref(), Some("signed.token.value"));
    let redirect = form.redirect().expect("redirect scheduled");
    assert_eq!(redirect.route, Route::Products);
    assert_eq!(redirect.delay, REDIRECT_DELAY);
}

#[tokio::test]
async fn failed_login_surfaces_message_and_stores_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"msg": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let api = AuthApi::new(server.uri());
    let tokens = MemoryTokenStore::new();
    let mut form = LoginForm::new();
    form.email = "a@b.com".into();
    form.password = "wrong".into();
    form.submit(&api, &tokens).await;

    assert_eq!(form.phase(), FormPhase::Failed);
    assert_eq!(form.message(), Some("Invalid credentials"));
    assert!(tokens.get(TOKEN_KEY).is_none());
}
