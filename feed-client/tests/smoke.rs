use feed_client::{FeedClient, FeedClientError};
use feed_core::{Pager, Settled};

fn server_url() -> String {
    std::env::var("FEED_HTTP_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string())
}

fn credentials() -> (String, String) {
    let user_id = std::env::var("FEED_USER_ID").expect("FEED_USER_ID must be set");
    let password = std::env::var("FEED_PASSWORD").expect("FEED_PASSWORD must be set");
    (user_id, password)
}

#[tokio::test]
#[ignore = "requires running feed-server and upstream credentials"]
async fn http_smoke_flow() {
    let client = FeedClient::new(&server_url()).expect("client must build");

    let before_login = client.list_posts(None).await;
    assert!(matches!(before_login, Err(FeedClientError::Unauthorized)));

    let (user_id, password) = credentials();
    client
        .login(&user_id, &password)
        .await
        .expect("login must succeed");
    let cookie = client.session_cookie().expect("session cookie must be stored");

    let mut pager = Pager::new();
    let first = pager
        .load_next(&client)
        .await
        .expect("first request must be issued");
    assert!(matches!(first, Settled::Appended { page_index: 0, .. } | Settled::Exhausted));

    if let Settled::Appended { .. } = first {
        let second = pager
            .load_next(&client)
            .await
            .expect("second request must be issued");
        assert!(!matches!(second, Settled::Failed(_)));
    }

    let restored = FeedClient::new(&server_url()).expect("client must build");
    restored.restore_session(&cookie).expect("cookie must restore");
    restored
        .list_posts(None)
        .await
        .expect("restored session must read the feed");

    client.logout().await.expect("logout must succeed");
    assert!(client.session_cookie().is_none());
}

#[tokio::test]
#[ignore = "requires running feed-server"]
async fn wrong_password_is_rejected() {
    let client = FeedClient::new(&server_url()).expect("client must build");

    let err = client
        .login("definitely-not-a-user", "wrong-password")
        .await
        .expect_err("login must fail");
    assert!(matches!(err, FeedClientError::Api { code: 1, .. }));
    assert!(client.session_cookie().is_none());
}
