use mockito::{Matcher, Server, ServerGuard};
use pmospotify::{SpotifyClient, SpotifyError};

const SHOW_ID: &str = "0onVY7weTsqjZLM8y3Tt9A";

fn client_for(server: &ServerGuard) -> SpotifyClient {
    SpotifyClient::builder("client-id", "client-secret")
        .api_base_url(format!("{}/v1", server.url()))
        .accounts_base_url(server.url())
        .build()
        .unwrap()
}

async fn mock_token(server: &mut ServerGuard) -> mockito::Mock {
    server
        .mock("POST", "/api/token")
        .match_body(Matcher::UrlEncoded(
            "grant_type".into(),
            "client_credentials".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"tok-1","token_type":"Bearer","expires_in":3600}"#)
        .create_async()
        .await
}

const EPISODES_BODY: &str = r#"{
    "items": [
        {"id": "e1", "uri": "spotify:episode:e1", "name": "News Update",
         "description": "Daily news", "release_date": "2024-03-19", "duration_ms": 600000},
        null,
        {"id": "e3", "uri": "spotify:episode:e3", "name": "Headlines: Monday",
         "description": "", "release_date": "2024-03-18", "duration_ms": 900000}
    ],
    "total": 120,
    "limit": 3,
    "offset": 0,
    "next": "https://api.spotify.com/v1/shows/x/episodes?offset=3&limit=3"
}"#;

#[tokio::test]
async fn episodes_are_returned_in_api_order_without_unavailable_items() -> anyhow::Result<()> {
    let mut server = Server::new_async().await;
    let token = mock_token(&mut server).await;
    let episodes = server
        .mock("GET", format!("/v1/shows/{SHOW_ID}/episodes").as_str())
        .match_header("authorization", "Bearer tok-1")
        .match_query(Matcher::UrlEncoded("limit".into(), "3".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(EPISODES_BODY)
        .create_async()
        .await;

    let client = client_for(&server);
    let page = client.get_show_episodes(SHOW_ID, None, 3).await?;

    let names: Vec<_> = page.items.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["News Update", "Headlines: Monday"]);
    assert_eq!(page.total, Some(120));
    assert!(page.next.is_some());

    token.assert_async().await;
    episodes.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn access_token_is_reused_between_requests() -> anyhow::Result<()> {
    let mut server = Server::new_async().await;
    let token = mock_token(&mut server).await;
    let episodes = server
        .mock("GET", format!("/v1/shows/{SHOW_ID}/episodes").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(EPISODES_BODY)
        .expect(2)
        .create_async()
        .await;

    let client = client_for(&server);
    client.get_show_episodes(SHOW_ID, None, 3).await?;
    client.get_show_episodes(SHOW_ID, Some(3), 3).await?;

    token.assert_async().await;
    episodes.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn page_without_items_is_malformed() {
    let mut server = Server::new_async().await;
    let _token = mock_token(&mut server).await;
    let _episodes = server
        .mock("GET", format!("/v1/shows/{SHOW_ID}/episodes").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"total": 0}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .get_show_episodes(SHOW_ID, None, 5)
        .await
        .unwrap_err();
    assert!(matches!(err, SpotifyError::MalformedResponse(_)));
}

#[tokio::test]
async fn window_larger_than_api_page_is_clamped() -> anyhow::Result<()> {
    let mut server = Server::new_async().await;
    let _token = mock_token(&mut server).await;
    let episodes = server
        .mock("GET", format!("/v1/shows/{SHOW_ID}/episodes").as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "50".into()),
            Matcher::UrlEncoded("offset".into(), "10".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"items": []}"#)
        .create_async()
        .await;

    let page = client_for(&server)
        .get_show_episodes(SHOW_ID, Some(10), 80)
        .await?;
    assert!(page.items.is_empty());
    assert_eq!(page.offset, 10);

    episodes.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn rejected_credentials_are_an_auth_error() {
    let mut server = Server::new_async().await;
    let _token = server
        .mock("POST", "/api/token")
        .with_status(400)
        .with_body(r#"{"error":"invalid_client","error_description":"Invalid client secret"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.validate_credentials().await.unwrap_err();
    assert!(err.is_auth_error());
    assert!(err.to_string().contains("Invalid client secret"));

    // the catalog is never reached without a token
    let err = client.get_show_episodes(SHOW_ID, None, 5).await.unwrap_err();
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn unknown_show_is_not_found() {
    let mut server = Server::new_async().await;
    let _token = mock_token(&mut server).await;
    let _show = server
        .mock("GET", "/v1/shows/unknown")
        .with_status(404)
        .with_body(r#"{"error":{"status":404,"message":"Non existing id"}}"#)
        .create_async()
        .await;

    let err = client_for(&server).get_show("unknown").await.unwrap_err();
    match err {
        SpotifyError::NotFound(message) => assert_eq!(message, "Non existing id"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn show_metadata_is_parsed() -> anyhow::Result<()> {
    let mut server = Server::new_async().await;
    let _token = mock_token(&mut server).await;
    let _show = server
        .mock("GET", format!("/v1/shows/{SHOW_ID}").as_str())
        .match_query(Matcher::UrlEncoded("market".into(), "FR".into()))
        .with_status(200)
        .with_body(format!(
            r#"{{"id":"{SHOW_ID}","name":"Morning News","publisher":"Radio X",
                "description":"News every morning","total_episodes":842,
                "uri":"spotify:show:{SHOW_ID}"}}"#
        ))
        .create_async()
        .await;

    let client = SpotifyClient::builder("client-id", "client-secret")
        .api_base_url(format!("{}/v1", server.url()))
        .accounts_base_url(server.url())
        .market("FR")
        .build()?;
    let show = client.get_show(SHOW_ID).await?;

    assert_eq!(show.name, "Morning News");
    assert_eq!(show.publisher, "Radio X");
    assert_eq!(show.total_episodes, 842);
    Ok(())
}
