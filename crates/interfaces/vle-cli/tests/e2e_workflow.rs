use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::http::{HeaderMap, StatusCode};
use axum::{routing::post, Json, Router};
use camino::Utf8PathBuf;
use serde_json::{json, Value};
use tempfile::tempdir;
use vle_app_core::SubmitOutcome;
use vle_cli::commands::{self, CliContext, CourseArgs, LoginArgs, RegisterArgs};
use vle_infra::SessionStorage;

#[derive(Default, Clone)]
struct Recorded {
    requests: Arc<Mutex<Vec<(String, Value, Option<String>)>>>,
}

impl Recorded {
    fn push(&self, route: &str, body: Value, headers: &HeaderMap) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.requests
            .lock()
            .unwrap()
            .push((route.to_string(), body, auth));
    }

    fn all(&self) -> Vec<(String, Value, Option<String>)> {
        self.requests.lock().unwrap().clone()
    }
}

async fn start_mock_api(recorded: Recorded) -> (SocketAddr, tokio::task::JoinHandle<()>) {
    let users = recorded.clone();
    let login = recorded.clone();
    let courses = recorded;

    let app = Router::new()
        .route(
            "/api/users",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let seen = users.clone();
                async move {
                    seen.push("users", body.clone(), &headers);
                    (
                        StatusCode::CREATED,
                        Json(json!({ "success": true, "data": { "id": 2, "name": body["name"] } })),
                    )
                }
            }),
        )
        .route(
            "/api/login",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let seen = login.clone();
                async move {
                    let ok = body["password"] == "correct-horse";
                    seen.push("login", body, &headers);
                    if ok {
                        (
                            StatusCode::OK,
                            Json(json!({
                                "success": true,
                                "data": { "token": "t0k", "user": { "id": 1, "name": "Ada" } }
                            })),
                        )
                    } else {
                        (
                            StatusCode::UNAUTHORIZED,
                            Json(json!({ "success": false, "error": { "message": "Invalid credentials" } })),
                        )
                    }
                }
            }),
        )
        .route(
            "/api/courses",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let seen = courses.clone();
                async move {
                    let authorized = headers.get("authorization").is_some();
                    seen.push("courses", body.clone(), &headers);
                    if authorized {
                        (StatusCode::CREATED, Json(json!({ "id": 40, "title": body["title"] })))
                    } else {
                        (
                            StatusCode::UNAUTHORIZED,
                            Json(json!({ "message": "Unauthenticated." })),
                        )
                    }
                }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, handle)
}

fn context(addr: SocketAddr, session_file: Utf8PathBuf) -> CliContext {
    let mut ctx = CliContext::new(Some(&format!("http://{addr}/api/")), Some(session_file)).unwrap();
    ctx.follow_redirects = false;
    ctx
}

fn course_args() -> CourseArgs {
    CourseArgs {
        title: "Intro to Rust".into(),
        description: "Ownership, borrowing and lifetimes".into(),
        category: "Computer Science".into(),
        level: "intermediate".into(),
    }
}

#[tokio::test]
async fn login_then_create_course_then_logout() {
    let recorded = Recorded::default();
    let (addr, server) = start_mock_api(recorded.clone()).await;
    let dir = tempdir().unwrap();
    let session_file = Utf8PathBuf::from_path_buf(dir.path().join("session.json")).unwrap();
    let ctx = context(addr, session_file.clone());

    let report = commands::cmd_login(
        &ctx,
        LoginArgs {
            email: "ada@example.com".into(),
            password: "correct-horse".into(),
            remember_me: true,
        },
    )
    .await
    .unwrap();
    assert!(report.is_success());
    assert_eq!(report.redirect.as_deref(), Some("/Courses"));
    assert!(session_file.exists());
    assert_eq!(
        ctx.storage().get(vle_config::SESSION_TOKEN_KEY).unwrap().as_deref(),
        Some("t0k")
    );

    let report = commands::cmd_create_course(&ctx, course_args()).await.unwrap();
    assert!(report.is_success());
    assert_eq!(report.redirect, None);
    assert_eq!(report.state.fields.text("title"), "");
    assert_eq!(report.state.fields.text("instructor_id"), "1");

    let requests = recorded.all();
    let (route, body, auth) = &requests[1];
    assert_eq!(route, "courses");
    assert_eq!(auth.as_deref(), Some("Bearer t0k"));
    assert_eq!(body["instructor_id"], "1");
    assert_eq!(body["level"], "intermediate");

    commands::cmd_logout(&ctx).unwrap();
    let report = commands::cmd_create_course(&ctx, course_args()).await.unwrap();
    assert_eq!(report.outcome, SubmitOutcome::Rejected);
    assert_eq!(report.state.api_message.text, "Unauthenticated.");
    assert_eq!(recorded.all()[2].2, None);

    server.abort();
}

#[tokio::test]
async fn wrong_password_reports_server_message() {
    let recorded = Recorded::default();
    let (addr, server) = start_mock_api(recorded.clone()).await;
    let dir = tempdir().unwrap();
    let session_file = Utf8PathBuf::from_path_buf(dir.path().join("session.json")).unwrap();
    let ctx = context(addr, session_file.clone());

    let report = commands::cmd_login(
        &ctx,
        LoginArgs {
            email: "ada@example.com".into(),
            password: "battery-staple".into(),
            remember_me: false,
        },
    )
    .await
    .unwrap();
    assert_eq!(report.outcome, SubmitOutcome::Rejected);
    assert_eq!(report.state.api_message.text, "Invalid credentials");
    assert_eq!(report.redirect, None);
    assert!(!session_file.exists());

    server.abort();
}

#[tokio::test]
async fn mismatched_passwords_never_reach_the_server() {
    let recorded = Recorded::default();
    let (addr, server) = start_mock_api(recorded.clone()).await;
    let dir = tempdir().unwrap();
    let ctx = context(
        addr,
        Utf8PathBuf::from_path_buf(dir.path().join("session.json")).unwrap(),
    );

    let report = commands::cmd_register(
        &ctx,
        RegisterArgs {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "password1".into(),
            confirm_password: "Password1".into(),
            role: "student".into(),
        },
    )
    .await
    .unwrap();
    assert!(matches!(report.outcome, SubmitOutcome::Invalid(_)));
    assert_eq!(
        report.state.error("confirmPassword"),
        Some("Passwords do not match")
    );
    assert!(recorded.all().is_empty());

    server.abort();
}

#[tokio::test]
async fn register_follows_redirect_to_login() {
    let recorded = Recorded::default();
    let (addr, server) = start_mock_api(recorded.clone()).await;
    let dir = tempdir().unwrap();
    let mut ctx = context(
        addr,
        Utf8PathBuf::from_path_buf(dir.path().join("session.json")).unwrap(),
    );
    ctx.follow_redirects = true;

    let report = commands::cmd_register(
        &ctx,
        RegisterArgs {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "password1".into(),
            confirm_password: "password1".into(),
            role: "instructor".into(),
        },
    )
    .await
    .unwrap();
    assert!(report.is_success());
    assert_eq!(report.redirect.as_deref(), Some("/login"));
    assert!(report.state.api_message.text.contains("Welcome, Ada"));
    assert_eq!(report.state.fields.text("email"), "");

    let requests = recorded.all();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].1,
        json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "password1",
            "role": "instructor",
        })
    );

    server.abort();
}
