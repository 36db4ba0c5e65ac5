pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/register", post(auth::handle_register))
        .route("/login", post(auth::handle_login))
        .route(
            "/resumes",
            post(resumes::handle_create).get(resumes::handle_list),
        )
        .route(
            "/resumes/:id",
            get(resumes::handle_get)
                .put(resumes::handle_update)
                .delete(resumes::handle_delete),
        )
        .route("/resumes/:id/improve", post(resumes::handle_improve))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use chrono::Duration;
    use jsonwebtoken::Algorithm;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::auth::{PasswordHasher, TokenIssuer};

    fn create_test_app() -> Router {
        let tokens = TokenIssuer::new(
            "router-test-secret-0123456789abcdef",
            Algorithm::HS256,
            Duration::minutes(30),
        );
        build_router(AppState::in_memory(tokens, PasswordHasher::new(4)))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(body) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&body).unwrap())
            }
            None => Body::empty(),
        };
        app.clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn register_and_login(app: &Router, email: &str, password: &str) -> String {
        let creds = json!({ "email": email, "password": password });
        let response = send(app, Method::POST, "/register", None, Some(creds.clone())).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = send(app, Method::POST, "/login", None, Some(creds)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["token_type"], "bearer");
        body["access_token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_test_app();
        let response = send(&app, Method::GET, "/health", None, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let app = create_test_app();
        let token = register_and_login(&app, "a@x.com", "pw1").await;

        let response = send(
            &app,
            Method::POST,
            "/resumes",
            Some(&token),
            Some(json!({ "title": "T", "content": "C" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response).await;
        assert_eq!(created["id"], 1);
        assert_eq!(created["title"], "T");
        assert_eq!(created["content"], "C");

        let other = register_and_login(&app, "b@x.com", "pw2").await;
        let response = send(&app, Method::GET, "/resumes/1", Some(&other), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(
            &app,
            Method::PUT,
            "/resumes/1",
            Some(&token),
            Some(json!({ "title": "T2", "content": "C2" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated = json_body(response).await;
        assert_eq!(updated["id"], 1);
        assert_eq!(updated["title"], "T2");
        assert_eq!(updated["owner_id"], created["owner_id"]);

        let response = send(&app, Method::POST, "/resumes/1/improve", Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let improved = json_body(response).await;
        assert_eq!(improved["improved_content"], "C2\n[Improved]");
    }

    #[tokio::test]
    async fn test_register_twice_is_rejected() {
        let app = create_test_app();
        register_and_login(&app, "a@x.com", "pw1").await;

        let response = send(
            &app,
            Method::POST,
            "/register",
            None,
            Some(json!({ "email": "a@x.com", "password": "different" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "EMAIL_TAKEN");
    }

    #[tokio::test]
    async fn test_login_failures_look_the_same() {
        let app = create_test_app();
        register_and_login(&app, "a@x.com", "pw1").await;

        let wrong_password = send(
            &app,
            Method::POST,
            "/login",
            None,
            Some(json!({ "email": "a@x.com", "password": "nope" })),
        )
        .await;
        let unknown_email = send(
            &app,
            Method::POST,
            "/login",
            None,
            Some(json!({ "email": "z@x.com", "password": "pw1" })),
        )
        .await;

        assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(wrong_password).await, json_body(unknown_email).await);
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        let app = create_test_app();

        for (method, uri) in [
            (Method::GET, "/resumes"),
            (Method::GET, "/resumes/1"),
            (Method::DELETE, "/resumes/1"),
            (Method::POST, "/resumes/1/improve"),
        ] {
            let response = send(&app, method, uri, None, None).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(
                response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
                "Bearer"
            );
        }

        let response = send(&app, Method::GET, "/resumes", Some("not-a-token"), None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_for_unknown_user_is_rejected() {
        let app = create_test_app();
        let tokens = TokenIssuer::new(
            "router-test-secret-0123456789abcdef",
            Algorithm::HS256,
            Duration::minutes(30),
        );
        let token = tokens.issue_default("ghost@x.com").unwrap();

        let response = send(&app, Method::GET, "/resumes", Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_ownership_isolation_and_double_delete() {
        let app = create_test_app();
        let a = register_and_login(&app, "a@x.com", "pw1").await;
        let b = register_and_login(&app, "b@x.com", "pw2").await;

        send(
            &app,
            Method::POST,
            "/resumes",
            Some(&a),
            Some(json!({ "title": "T", "content": "C" })),
        )
        .await;

        let response = send(&app, Method::GET, "/resumes", Some(&b), None).await;
        assert_eq!(json_body(response).await, json!([]));

        let response = send(
            &app,
            Method::PUT,
            "/resumes/1",
            Some(&b),
            Some(json!({ "title": "X", "content": "X" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = send(&app, Method::POST, "/resumes/1/improve", Some(&b), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = send(&app, Method::DELETE, "/resumes/1", Some(&b), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, Method::GET, "/resumes", Some(&a), None).await;
        let listed = json_body(response).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["title"], "T");

        let response = send(&app, Method::DELETE, "/resumes/1", Some(&a), None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let response = send(&app, Method::DELETE, "/resumes/1", Some(&a), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_json_validation_error() {
        let app = create_test_app();
        let token = register_and_login(&app, "a@x.com", "pw1").await;

        for (method, uri) in [
            (Method::GET, "/resumes/abc"),
            (Method::DELETE, "/resumes/abc"),
            (Method::POST, "/resumes/abc/improve"),
        ] {
            let response = send(&app, method, uri, Some(&token), None).await;
            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
            let body = json_body(response).await;
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
            assert!(body["error"]["message"].is_string());
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_validation_error() {
        let app = create_test_app();
        let token = register_and_login(&app, "a@x.com", "pw1").await;

        let response = send(
            &app,
            Method::POST,
            "/resumes",
            Some(&token),
            Some(json!({ "title": "T" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }
}
