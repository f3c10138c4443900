//! Integration tests for the full router.
//!
//! Each test builds a fresh app over its own temporary database, drives it
//! through `tower::ServiceExt::oneshot`, and asserts on the transport-level
//! behavior: status codes, redirect targets, and the rule that an ownership
//! denial is byte-identical to a genuine not-found.

#[cfg(test)]
mod tests {
    use crate::{create_router, AppState};
    use axum::{
        body::{Body, Bytes},
        http::{header, Request, Response, StatusCode},
        Router,
    };
    use chrono::{Duration, Utc};
    use database::{
        initialize_database, CommentStore, Database, DatabaseConfig, NewsStore, NoteStore,
        NEWS_PER_PAGE,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;
    use tower_sessions::{MemoryStore, SessionManagerLayer};

    struct TestApp {
        _dir: TempDir,
        db: Arc<Database>,
        router: Router,
    }

    impl TestApp {
        async fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let db_path = dir.path().join("test.db");
            let db = initialize_database(DatabaseConfig::new().with_database_path(db_path))
                .await
                .unwrap();

            let session_layer =
                SessionManagerLayer::new(MemoryStore::default()).with_secure(false);
            let router = create_router(AppState { db: db.clone() }, session_layer);

            Self {
                _dir: dir,
                db,
                router,
            }
        }

        async fn get(&self, path: &str, cookie: Option<&str>) -> Response<Body> {
            let mut builder = Request::builder().method("GET").uri(path);
            if let Some(cookie) = cookie {
                builder = builder.header(header::COOKIE, cookie);
            }
            self.router
                .clone()
                .oneshot(builder.body(Body::empty()).unwrap())
                .await
                .unwrap()
        }

        async fn post_json(
            &self,
            path: &str,
            body: Value,
            cookie: Option<&str>,
        ) -> Response<Body> {
            let mut builder = Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json");
            if let Some(cookie) = cookie {
                builder = builder.header(header::COOKIE, cookie);
            }
            self.router
                .clone()
                .oneshot(builder.body(Body::from(body.to_string())).unwrap())
                .await
                .unwrap()
        }

        /// Register a user and return the session cookie identifying them.
        async fn register(&self, username: &str) -> String {
            let response = self
                .post_json(
                    "/api/v1/auth/register",
                    json!({ "username": username, "password": "correct horse" }),
                    None,
                )
                .await;
            assert_eq!(response.status(), StatusCode::CREATED);

            let set_cookie = response
                .headers()
                .get(header::SET_COOKIE)
                .expect("register should set a session cookie")
                .to_str()
                .unwrap();
            set_cookie
                .split(';')
                .next()
                .unwrap()
                .to_string()
        }
    }

    async fn body_bytes(response: Response<Body>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    async fn body_json(response: Response<Body>) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    fn location(response: &Response<Body>) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .expect("expected a Location header")
            .to_str()
            .unwrap()
    }

    // -- news ------------------------------------------------------------

    #[tokio::test]
    async fn test_home_page_caps_at_page_size_newest_first() {
        let app = TestApp::new().await;
        let news = NewsStore::new(&app.db);

        let today = Utc::now();
        for index in 0..(NEWS_PER_PAGE + 1) {
            news.create(
                &format!("News {index}"),
                "Text",
                today - Duration::days(index),
            )
            .await
            .unwrap();
        }

        let response = app.get("/api/v1/news/list", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["count"], NEWS_PER_PAGE);
        assert_eq!(body["news"][0]["title"], "News 0");
        assert_eq!(
            body["news"][(NEWS_PER_PAGE - 1) as usize]["title"],
            format!("News {}", NEWS_PER_PAGE - 1)
        );
    }

    #[tokio::test]
    async fn test_news_detail_orders_comments_oldest_first() {
        let app = TestApp::new().await;
        let cookie = app.register("commenter").await;

        let news_id = NewsStore::new(&app.db)
            .create("Headline", "Text", Utc::now())
            .await
            .unwrap();

        for text in ["first", "second", "third"] {
            let response = app
                .post_json(
                    &format!("/api/v1/comments/create/{news_id}"),
                    json!({ "text": text }),
                    Some(&cookie),
                )
                .await;
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
        }

        let response = app.get(&format!("/api/v1/news/read/{news_id}"), None).await;
        let body = body_json(response).await;

        let texts: Vec<&str> = body["comments"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["text"].as_str().unwrap())
            .collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_comment_form_shown_to_logged_in_only() {
        let app = TestApp::new().await;
        let cookie = app.register("reader").await;

        let news_id = NewsStore::new(&app.db)
            .create("Headline", "Text", Utc::now())
            .await
            .unwrap();

        let anonymous = body_json(app.get(&format!("/api/v1/news/read/{news_id}"), None).await).await;
        assert_eq!(anonymous["comment_form"], false);

        let logged_in =
            body_json(app.get(&format!("/api/v1/news/read/{news_id}"), Some(&cookie)).await).await;
        assert_eq!(logged_in["comment_form"], true);
    }

    #[tokio::test]
    async fn test_missing_news_detail_is_not_found() {
        let app = TestApp::new().await;
        let response = app.get("/api/v1/news/read/999", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // -- comments --------------------------------------------------------

    #[tokio::test]
    async fn test_anonymous_comment_create_redirects_to_login() {
        let app = TestApp::new().await;
        let news_id = NewsStore::new(&app.db)
            .create("Headline", "Text", Utc::now())
            .await
            .unwrap();

        let response = app
            .post_json(
                &format!("/api/v1/comments/create/{news_id}"),
                json!({ "text": "hello" }),
                None,
            )
            .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            location(&response),
            format!(
                "/api/v1/auth/login?next=%2Fapi%2Fv1%2Fcomments%2Fcreate%2F{}",
                news_id
            )
        );

        // Nothing was created
        assert_eq!(CommentStore::new(&app.db).count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_logged_in_user_can_comment() {
        let app = TestApp::new().await;
        let cookie = app.register("commenter").await;
        let news_id = NewsStore::new(&app.db)
            .create("Headline", "Text", Utc::now())
            .await
            .unwrap();

        let response = app
            .post_json(
                &format!("/api/v1/comments/create/{news_id}"),
                json!({ "text": "nice article" }),
                Some(&cookie),
            )
            .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            location(&response),
            format!("/api/v1/news/read/{news_id}#comments")
        );
        assert_eq!(CommentStore::new(&app.db).count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_prohibited_words_rejected() {
        let app = TestApp::new().await;
        let cookie = app.register("commenter").await;
        let news_id = NewsStore::new(&app.db)
            .create("Headline", "Text", Utc::now())
            .await
            .unwrap();

        let response = app
            .post_json(
                &format!("/api/v1/comments/create/{news_id}"),
                json!({ "text": "you absolute Scoundrel" }),
                Some(&cookie),
            )
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], content::PROHIBITED_WARNING);
        assert_eq!(body["error"]["details"]["field"], "text");

        assert_eq!(CommentStore::new(&app.db).count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_author_can_edit_and_delete_own_comment() {
        let app = TestApp::new().await;
        let cookie = app.register("author").await;
        let news_id = NewsStore::new(&app.db)
            .create("Headline", "Text", Utc::now())
            .await
            .unwrap();

        app.post_json(
            &format!("/api/v1/comments/create/{news_id}"),
            json!({ "text": "original" }),
            Some(&cookie),
        )
        .await;

        let comments = CommentStore::new(&app.db);
        let comment_id = comments.list_for_news(news_id).await.unwrap()[0].id;

        let response = app
            .post_json(
                &format!("/api/v1/comments/update/{comment_id}"),
                json!({ "text": "edited" }),
                Some(&cookie),
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            comments.get(comment_id).await.unwrap().unwrap().text,
            "edited"
        );

        let response = app
            .post_json(
                &format!("/api/v1/comments/delete/{comment_id}"),
                json!({}),
                Some(&cookie),
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(comments.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_foreign_comment_mutation_denied_as_not_found() {
        let app = TestApp::new().await;
        let author = app.register("author").await;
        let other = app.register("auth_user").await;

        let news_id = NewsStore::new(&app.db)
            .create("Headline", "Text", Utc::now())
            .await
            .unwrap();
        app.post_json(
            &format!("/api/v1/comments/create/{news_id}"),
            json!({ "text": "original" }),
            Some(&author),
        )
        .await;

        let comments = CommentStore::new(&app.db);
        let comment_id = comments.list_for_news(news_id).await.unwrap()[0].id;

        let edit = app
            .post_json(
                &format!("/api/v1/comments/update/{comment_id}"),
                json!({ "text": "hijacked" }),
                Some(&other),
            )
            .await;
        assert_eq!(edit.status(), StatusCode::NOT_FOUND);

        let delete = app
            .post_json(
                &format!("/api/v1/comments/delete/{comment_id}"),
                json!({}),
                Some(&other),
            )
            .await;
        assert_eq!(delete.status(), StatusCode::NOT_FOUND);

        // A denial must be indistinguishable from a genuinely missing comment
        let denial_body = body_bytes(
            app.post_json(
                &format!("/api/v1/comments/update/{comment_id}"),
                json!({ "text": "hijacked" }),
                Some(&other),
            )
            .await,
        )
        .await;
        let missing_body = body_bytes(
            app.post_json(
                "/api/v1/comments/update/424242",
                json!({ "text": "hijacked" }),
                Some(&other),
            )
            .await,
        )
        .await;
        assert_eq!(denial_body, missing_body);

        // The comment is untouched
        assert_eq!(
            comments.get(comment_id).await.unwrap().unwrap().text,
            "original"
        );
    }

    // -- notes -----------------------------------------------------------

    #[tokio::test]
    async fn test_anonymous_note_create_redirects_to_login() {
        let app = TestApp::new().await;

        let response = app
            .post_json(
                "/api/v1/notes/create",
                json!({ "title": "Mine", "text": "Text" }),
                None,
            )
            .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            location(&response),
            "/api/v1/auth/login?next=%2Fapi%2Fv1%2Fnotes%2Fcreate"
        );
        assert_eq!(NoteStore::new(&app.db).count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_note_create_derives_slug_from_title() {
        let app = TestApp::new().await;
        let cookie = app.register("author").await;

        let response = app
            .post_json(
                "/api/v1/notes/create",
                json!({ "title": "My First Note", "text": "Text" }),
                Some(&cookie),
            )
            .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/api/v1/notes/success");

        let note = NoteStore::new(&app.db)
            .get_by_slug("my-first-note")
            .await
            .unwrap();
        assert!(note.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected_before_creation() {
        let app = TestApp::new().await;
        let cookie = app.register("author").await;

        app.post_json(
            "/api/v1/notes/create",
            json!({ "title": "One", "text": "Text", "slug": "same" }),
            Some(&cookie),
        )
        .await;

        let response = app
            .post_json(
                "/api/v1/notes/create",
                json!({ "title": "Two", "text": "Text", "slug": "same" }),
                Some(&cookie),
            )
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(
            body["error"]["message"],
            format!("same{}", content::SLUG_TAKEN_WARNING)
        );
        assert_eq!(body["error"]["details"]["field"], "slug");

        assert_eq!(NoteStore::new(&app.db).count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_notes_list_scoped_to_requester() {
        let app = TestApp::new().await;
        let author = app.register("author").await;
        let other = app.register("auth_user").await;

        app.post_json(
            "/api/v1/notes/create",
            json!({ "title": "Mine", "text": "Text", "slug": "mine" }),
            Some(&author),
        )
        .await;
        app.post_json(
            "/api/v1/notes/create",
            json!({ "title": "Theirs", "text": "Text", "slug": "theirs" }),
            Some(&other),
        )
        .await;

        let body = body_json(app.get("/api/v1/notes/list", Some(&author)).await).await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["notes"][0]["slug"], "mine");

        let body = body_json(app.get("/api/v1/notes/list", Some(&other)).await).await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["notes"][0]["slug"], "theirs");
    }

    #[tokio::test]
    async fn test_anonymous_notes_list_redirects_to_login() {
        let app = TestApp::new().await;
        let response = app.get("/api/v1/notes/list", None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            location(&response),
            "/api/v1/auth/login?next=%2Fapi%2Fv1%2Fnotes%2Flist"
        );
    }

    #[tokio::test]
    async fn test_owner_can_edit_own_note() {
        let app = TestApp::new().await;
        let cookie = app.register("author").await;

        app.post_json(
            "/api/v1/notes/create",
            json!({ "title": "Old", "text": "Old text", "slug": "test-slug" }),
            Some(&cookie),
        )
        .await;

        let notes = NoteStore::new(&app.db);
        let before = notes.get_by_slug("test-slug").await.unwrap().unwrap();

        let response = app
            .post_json(
                "/api/v1/notes/update/test-slug",
                json!({ "title": "New", "text": "New text", "slug": "new-slug" }),
                Some(&cookie),
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/api/v1/notes/success");

        let after = notes.get_by_slug("new-slug").await.unwrap().unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.title, "New");
        assert_eq!(after.text, "New text");
        // Authorship survives edits
        assert_eq!(after.author_id, before.author_id);
        // No duplicate created
        assert_eq!(notes.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_foreign_note_mutation_denied_as_not_found() {
        let app = TestApp::new().await;
        let author = app.register("author").await;
        let other = app.register("auth_user").await;

        app.post_json(
            "/api/v1/notes/create",
            json!({ "title": "Mine", "text": "Text", "slug": "test-slug" }),
            Some(&author),
        )
        .await;

        let edit = app
            .post_json(
                "/api/v1/notes/update/test-slug",
                json!({ "title": "Stolen", "text": "Text", "slug": "test-slug" }),
                Some(&other),
            )
            .await;
        assert_eq!(edit.status(), StatusCode::NOT_FOUND);

        let delete = app
            .post_json("/api/v1/notes/delete/test-slug", json!({}), Some(&other))
            .await;
        assert_eq!(delete.status(), StatusCode::NOT_FOUND);

        // Byte-identical to a slug that was never created
        let denial_body = body_bytes(
            app.post_json("/api/v1/notes/delete/test-slug", json!({}), Some(&other))
                .await,
        )
        .await;
        let missing_body = body_bytes(
            app.post_json("/api/v1/notes/delete/never-existed", json!({}), Some(&other))
                .await,
        )
        .await;
        assert_eq!(denial_body, missing_body);

        let notes = NoteStore::new(&app.db);
        let note = notes.get_by_slug("test-slug").await.unwrap().unwrap();
        assert_eq!(note.title, "Mine");
        assert_eq!(notes.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_note_read_is_public() {
        let app = TestApp::new().await;
        let author = app.register("author").await;
        let other = app.register("auth_user").await;

        app.post_json(
            "/api/v1/notes/create",
            json!({ "title": "Mine", "text": "Text", "slug": "test-slug" }),
            Some(&author),
        )
        .await;

        // Viewing is not an ownership question: another user may read it
        let response = app.get("/api/v1/notes/read/test-slug", Some(&other)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["title"], "Mine");
        assert_eq!(body["slug"], "test-slug");

        // So may an anonymous client
        let response = app.get("/api/v1/notes/read/test-slug", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        // A slug that was never created is a plain miss
        let response = app.get("/api/v1/notes/read/never-existed", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_owner_can_delete_own_note() {
        let app = TestApp::new().await;
        let cookie = app.register("author").await;

        app.post_json(
            "/api/v1/notes/create",
            json!({ "title": "Mine", "text": "Text", "slug": "test-slug" }),
            Some(&cookie),
        )
        .await;

        let response = app
            .post_json("/api/v1/notes/delete/test-slug", json!({}), Some(&cookie))
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(NoteStore::new(&app.db).count().await.unwrap(), 0);
    }

    // -- auth ------------------------------------------------------------

    #[tokio::test]
    async fn test_login_resumes_continuation_target() {
        let app = TestApp::new().await;
        // Register to create the account, then drop the cookie
        app.register("author").await;

        let response = app
            .post_json(
                "/api/v1/auth/login?next=%2Fapi%2Fv1%2Fnotes%2Flist",
                json!({ "username": "author", "password": "correct horse" }),
                None,
            )
            .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/api/v1/notes/list");
    }

    #[tokio::test]
    async fn test_login_ignores_offsite_continuation_target() {
        let app = TestApp::new().await;
        app.register("author").await;

        // Scheme-relative "//host" must not become a redirect target
        let response = app
            .post_json(
                "/api/v1/auth/login?next=%2F%2Fevil.example",
                json!({ "username": "author", "password": "correct horse" }),
                None,
            )
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::LOCATION).is_none());
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let app = TestApp::new().await;
        app.register("author").await;

        let response = app
            .post_json(
                "/api/v1/auth/login",
                json!({ "username": "author", "password": "wrong" }),
                None,
            )
            .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_page_echoes_next() {
        let app = TestApp::new().await;
        let response = app
            .get("/api/v1/auth/login?next=%2Fapi%2Fv1%2Fnotes%2Fcreate", None)
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["next"], "/api/v1/notes/create");
    }

    #[tokio::test]
    async fn test_logout_reverts_to_anonymous() {
        let app = TestApp::new().await;
        let cookie = app.register("author").await;

        let me = body_json(app.get("/api/v1/auth/me", Some(&cookie)).await).await;
        assert_eq!(me["authenticated"], true);
        assert_eq!(me["username"], "author");

        let response = app
            .post_json("/api/v1/auth/logout", json!({}), Some(&cookie))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let me = body_json(app.get("/api/v1/auth/me", Some(&cookie)).await).await;
        assert_eq!(me["authenticated"], false);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let app = TestApp::new().await;
        app.register("author").await;

        let response = app
            .post_json(
                "/api/v1/auth/register",
                json!({ "username": "author", "password": "other" }),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
