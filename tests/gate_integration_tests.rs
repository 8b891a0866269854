//! End-to-end gate tests
//!
//! Spawns a real server on an ephemeral port with the gate layered over stub
//! page handlers, then drives it with a redirect-disabled HTTP client and
//! asserts on status codes and Location headers.

use axum::{middleware, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use edgegate::auth::{create_token, Role};
use edgegate::config::Config;
use edgegate::gate::route_gate;
use edgegate::server::GateState;

const SECRET: &str = "gate-integration-secret";

/// Spawn a gate-fronted stub application, returning its base URL
async fn spawn_gate() -> String {
    let mut config = Config::default();
    config.auth.secret = SECRET.to_string();

    let state = Arc::new(GateState::new(config));

    // Stub application: every page responds 200, so any redirect observed by
    // the client is the gate's doing.
    let app = Router::new()
        .fallback(|| async { "ok" })
        .layer(middleware::from_fn_with_state(state, route_gate));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    // Give the acceptor a moment to come up
    sleep(Duration::from_millis(20)).await;

    format!("http://{}", addr)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("client")
}

fn access_cookie(role: Role, ttl_secs: i64) -> String {
    let token = create_token(SECRET, "it-user", role, ttl_secs).expect("token");
    format!("access_token={}", token)
}

async fn get(base: &str, path: &str, cookie: Option<&str>) -> reqwest::Response {
    let mut req = client().get(format!("{}{}", base, path));
    if let Some(cookie) = cookie {
        req = req.header("Cookie", cookie);
    }
    req.send().await.expect("request")
}

fn location(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get("location")
        .expect("Location header")
        .to_str()
        .expect("utf8 location")
}

#[tokio::test]
async fn test_anonymous_dashboard_redirects_home() {
    let base = spawn_gate().await;
    let response = get(&base, "/dashboard", None).await;
    assert_eq!(response.status(), 307);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_anonymous_public_pages_pass_through() {
    let base = spawn_gate().await;
    for path in ["/", "/courses", "/blog/some-post", "/login"] {
        let response = get(&base, path, None).await;
        assert_eq!(response.status(), 200, "path {path}");
    }
}

#[tokio::test]
async fn test_student_bounced_from_dashboard_to_profile() {
    let base = spawn_gate().await;
    let cookie = access_cookie(Role::Student, 3600);
    let response = get(&base, "/dashboard/courses", Some(&cookie)).await;
    assert_eq!(response.status(), 307);
    assert_eq!(location(&response), "/profile");
}

#[tokio::test]
async fn test_student_profile_allowed() {
    let base = spawn_gate().await;
    let cookie = access_cookie(Role::Student, 3600);
    let response = get(&base, "/profile", Some(&cookie)).await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_admin_profile_goes_to_dashboard_profile() {
    let base = spawn_gate().await;
    let cookie = access_cookie(Role::Admin, 3600);
    let response = get(&base, "/profile", Some(&cookie)).await;
    assert_eq!(response.status(), 307);
    assert_eq!(location(&response), "/dashboard/profile");
}

#[tokio::test]
async fn test_teacher_denied_news_section() {
    let base = spawn_gate().await;
    let cookie = access_cookie(Role::Teacher, 3600);
    let response = get(&base, "/dashboard/news", Some(&cookie)).await;
    assert_eq!(response.status(), 307);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_authenticated_admin_bounced_from_login() {
    let base = spawn_gate().await;
    let cookie = access_cookie(Role::Admin, 3600);
    let response = get(&base, "/login", Some(&cookie)).await;
    assert_eq!(response.status(), 307);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_expired_token_treated_as_anonymous() {
    let base = spawn_gate().await;
    let cookie = access_cookie(Role::Admin, -3600);
    let response = get(&base, "/dashboard", Some(&cookie)).await;
    assert_eq!(response.status(), 307);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_garbage_token_treated_as_anonymous() {
    let base = spawn_gate().await;
    let response = get(&base, "/dashboard", Some("access_token=nonsense")).await;
    assert_eq!(response.status(), 307);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_forged_role_cookie_carries_no_authority() {
    // The non-httpOnly role mirror cookie is a UI hint; without a verified
    // access token it must not open the dashboard.
    let base = spawn_gate().await;
    let response = get(&base, "/dashboard", Some("role=admin")).await;
    assert_eq!(response.status(), 307);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_excluded_paths_bypass_the_gate() {
    let base = spawn_gate().await;
    for path in ["/favicon.ico", "/robots.txt", "/api/courses", "/static/site.css"] {
        let response = get(&base, path, None).await;
        assert_eq!(response.status(), 200, "path {path}");
    }
}

#[tokio::test]
async fn test_editor_contained_even_with_valid_session() {
    let base = spawn_gate().await;
    let cookie = access_cookie(Role::Editor, 3600);

    let denied = get(&base, "/dashboard/users", Some(&cookie)).await;
    assert_eq!(denied.status(), 307);
    assert_eq!(location(&denied), "/dashboard/news");

    let allowed = get(&base, "/dashboard/blog", Some(&cookie)).await;
    assert_eq!(allowed.status(), 200);
}
