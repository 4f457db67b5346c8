//! Integration tests for the guarded client against a mock API

use std::sync::Arc;
use std::time::{Duration, Instant};

use retgate::{
    Catalog, GuardConfig, GuardedClient, OutboundRequest, PageContext, RecordingNavigator,
    RecordingNotifier, Retcode,
};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Page {
    client: GuardedClient,
    navigator: Arc<RecordingNavigator>,
    notifier: Arc<RecordingNotifier>,
}

fn page(href: &str) -> Page {
    page_with(href, GuardConfig::production())
}

fn page_with(href: &str, config: GuardConfig) -> Page {
    let navigator = Arc::new(RecordingNavigator::at(href).unwrap());
    let notifier = Arc::new(RecordingNotifier::new());
    let context = PageContext::new(
        navigator.clone(),
        Arc::new(Catalog::new("zh-CN")),
        notifier.clone(),
    );
    let client = GuardedClient::new(config, context).unwrap();

    Page {
        client,
        navigator,
        notifier,
    }
}

#[tokio::test]
async fn test_token_and_header_reach_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items"))
        .and(query_param("token", "abc123"))
        .and(header("x-requested-with", "XMLHttpRequest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"retcode": 0, "data": [1, 2]})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = page("https://app.test/orders?token=abc123");
    let response = page
        .client
        .get(format!("{}/api/items", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(response.status_code(), 200);
    assert!(response.envelope().retcode.is_ok());
    assert!(page.navigator.navigations().is_empty());
    assert!(page.notifier.is_empty());
}

#[tokio::test]
async fn test_stale_token_removed_when_page_has_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"retcode": 0})))
        .mount(&mock_server)
        .await;

    let page = page("https://app.test/orders?a=1");
    let request = OutboundRequest::get(format!("{}/api/items", mock_server.uri()))
        .unwrap()
        .param("token", "stale")
        .param("page", "2");
    page.client.send(request).await.unwrap();

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    let pairs: Vec<(String, String)> = received[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(pairs, vec![("page".to_string(), "2".to_string())]);
}

#[tokio::test]
async fn test_transfer_login_rejects_with_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"retcode": 4006, "message": "登录已过期"})),
        )
        .mount(&mock_server)
        .await;

    let page = page("https://app.test/orders");
    let err = page
        .client
        .get(format!("{}/api/items", mock_server.uri()))
        .await
        .unwrap_err();

    assert!(err.is_rejection());
    assert_eq!(err.retcode(), Some(&Retcode::Code(4006)));
    assert_eq!(err.reason(), Some("登录已过期"));

    let navigations = page.navigator.navigations();
    assert_eq!(navigations.len(), 1);
    assert!(navigations[0].starts_with("https://passport.com.cn/?callback=https://com.cn/&_"));
    assert!(navigations[0].ends_with("#!/access/login"));

    // the warning hook runs before the guard
    assert_eq!(page.notifier.warnings(), vec!["登录已过期"]);
}

#[tokio::test]
async fn test_not_login_redirect_abandons_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"retcode": "not_login", "redirect": "https://sso.test/login?from=app"}),
        ))
        .mount(&mock_server)
        .await;

    let page = page("https://app.test/orders");
    let err = page
        .client
        .get(format!("{}/api/items", mock_server.uri()))
        .await
        .unwrap_err();

    assert!(err.is_abandoned());
    assert_eq!(err.target(), Some("https://sso.test/login?from=app"));
    assert_eq!(
        page.navigator.navigations(),
        vec!["https://sso.test/login?from=app"]
    );
}

#[tokio::test]
async fn test_portal_login_suppressed_on_login_redirect_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/session"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"retcode": 4005, "message": "未登录"})),
        )
        .mount(&mock_server)
        .await;

    let page = page("https://app.test/pdata/login-redirect?_path=/orders");
    let response = page
        .client
        .get(format!("{}/api/session", mock_server.uri()))
        .await
        .unwrap();

    assert!(response.envelope().retcode.is_code(4005));
    assert!(page.navigator.navigations().is_empty());
    assert!(page.notifier.is_empty());
}

#[tokio::test]
async fn test_server_error_status_forwarded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let page = page("https://app.test/orders");
    let err = page
        .client
        .get(format!("{}/api/items", mock_server.uri()))
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.status_code(), Some(500));
    assert!(page.navigator.navigations().is_empty());
    assert!(page.notifier.is_empty());
}

#[tokio::test]
async fn test_warning_shown_and_response_returned() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .and(header("content-type", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"retcode": 1001, "message": "参数错误"})),
        )
        .mount(&mock_server)
        .await;

    let page = page("https://app.test/orders?token=t1");
    let response = page
        .client
        .post_json(format!("{}/api/orders", mock_server.uri()), &json!({"id": 7}))
        .await
        .unwrap();

    assert!(response.envelope().retcode.is_code(1001));
    assert_eq!(page.notifier.warnings(), vec!["参数错误"]);
    assert!(page.navigator.navigations().is_empty());
}

#[tokio::test]
async fn test_send_all_keeps_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"retcode": 0})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let page = page("https://app.test/orders");
    let requests = vec![
        OutboundRequest::get(format!("{}/api/ok", mock_server.uri())).unwrap(),
        OutboundRequest::get(format!("{}/api/broken", mock_server.uri())).unwrap(),
        OutboundRequest::get(format!("{}/api/ok", mock_server.uri())).unwrap(),
    ];

    let results = page.client.send_all(requests).await;

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert_eq!(results[1].as_ref().unwrap_err().status_code(), Some(503));
    assert!(results[2].is_ok());
}

#[tokio::test]
async fn test_configured_timeout_applies() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"retcode": 0}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let config = GuardConfig::production().with_timeout(Duration::from_secs(1));
    let page = page_with("https://app.test/orders", config);

    let start = Instant::now();
    let err = page
        .client
        .get(format!("{}/api/slow", mock_server.uri()))
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert!(err.is_transport());
    assert!(start.elapsed() < Duration::from_secs(3));
    assert!(page.navigator.navigations().is_empty());
}

#[tokio::test]
async fn test_request_timeout_overrides_config() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"retcode": 0}))
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&mock_server)
        .await;

    let config = GuardConfig::production().with_timeout(Duration::from_secs(1));
    let page = page_with("https://app.test/orders", config);

    let request = OutboundRequest::get(format!("{}/api/slow", mock_server.uri()))
        .unwrap()
        .timeout(Duration::from_secs(10));
    let response = page.client.send(request).await.unwrap();

    assert!(response.envelope().retcode.is_ok());
}
