#[cfg(test)]
mod tests {
    use crate::api::{CommandApi, DiscordClient, ResponseBody};
    use crate::cli::Config;
    use crate::error::Result;
    use crate::models::{ListOutcome, Scope};
    use mockito::Matcher;
    use reqwest::{Method, StatusCode};
    use rstest::rstest;
    use serde_json::json;
    use std::path::PathBuf;

    const APP_ID: &str = "111";
    const GUILD_ID: &str = "222";
    const TOKEN: &str = "test_token";

    // Helper to build a configuration without going through the prompts
    fn test_config(guild_id: Option<&str>) -> Config {
        Config {
            application_id: APP_ID.to_string(),
            bot_token: TOKEN.to_string(),
            guild_id: guild_id.map(str::to_string),
            output_dir: PathBuf::from("unused"),
        }
    }

    fn global_path() -> String {
        format!("/api/v10/applications/{}/commands", APP_ID)
    }

    fn guild_path() -> String {
        format!("/api/v10/applications/{}/guilds/{}/commands", APP_ID, GUILD_ID)
    }

    #[tokio::test]
    async fn test_list_global_commands_success() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let body = json!([
            {"id": "1", "name": "ping", "description": "Ping", "type": 1, "version": "9"},
            {"id": "2", "name": "pong", "description": ""}
        ]);
        let mock = server
            .mock("GET", global_path().as_str())
            .match_header("authorization", format!("Bot {}", TOKEN).as_str())
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = DiscordClient::new_with_base_url(&test_config(None), &server.url())?;
        let outcome = client.list_commands(Scope::Global).await;

        mock.assert_async().await;
        let commands = outcome.commands();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].id, "1");
        assert_eq!(commands[1].name, "pong");
        // Pass-through fields survive untouched
        assert_eq!(serde_json::to_value(commands)?, body);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_guild_commands_uses_guild_endpoint() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", guild_path().as_str())
            .with_status(200)
            .with_body(r#"[{"id":"9","name":"local"}]"#)
            .create_async()
            .await;

        let client = DiscordClient::new_with_base_url(&test_config(Some(GUILD_ID)), &server.url())?;
        let outcome = client.list_commands(Scope::Guild).await;

        mock.assert_async().await;
        assert_eq!(outcome.commands().len(), 1);
        assert_eq!(outcome.commands()[0].id, "9");

        Ok(())
    }

    #[rstest]
    #[case(401)]
    #[case(403)]
    #[case(404)]
    #[case(429)]
    #[case(500)]
    #[case(204)]
    #[tokio::test]
    async fn test_list_non_200_is_failure(#[case] status: usize) -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", global_path().as_str())
            .with_status(status)
            .with_header("retry-after", "1.5")
            .with_body(r#"{"message":"nope","code":0}"#)
            .create_async()
            .await;

        let client = DiscordClient::new_with_base_url(&test_config(None), &server.url())?;
        let outcome = client.list_commands(Scope::Global).await;

        assert!(outcome.is_failed());
        assert!(outcome.commands().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_list_non_array_body_is_failure() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", global_path().as_str())
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let client = DiscordClient::new_with_base_url(&test_config(None), &server.url())?;
        let outcome = client.list_commands(Scope::Global).await;

        assert!(outcome.is_failed());
        Ok(())
    }

    #[tokio::test]
    async fn test_list_transport_error_is_failure() -> Result<()> {
        // Nothing listens on port 1
        let client = DiscordClient::new_with_base_url(&test_config(None), "http://127.0.0.1:1")?;
        let outcome = client.list_commands(Scope::Global).await;

        assert!(matches!(outcome, ListOutcome::Failed(_)));
        Ok(())
    }

    #[tokio::test]
    async fn test_guild_scope_without_guild_id_sends_nothing() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let delete_mock = server
            .mock("DELETE", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = DiscordClient::new_with_base_url(&test_config(Some("")), &server.url())?;
        assert!(client.list_commands(Scope::Guild).await.is_failed());
        assert!(!client.delete_command(Scope::Guild, "1", "ping").await);

        mock.assert_async().await;
        delete_mock.assert_async().await;
        Ok(())
    }

    #[rstest]
    #[case(200, true)]
    #[case(204, true)]
    #[case(400, false)]
    #[case(401, false)]
    #[case(404, false)]
    #[case(429, false)]
    #[case(500, false)]
    #[tokio::test]
    async fn test_delete_status_mapping(#[case] status: usize, #[case] expected: bool) -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", format!("{}/42", global_path()).as_str())
            .match_header("authorization", format!("Bot {}", TOKEN).as_str())
            .with_status(status)
            .create_async()
            .await;

        let client = DiscordClient::new_with_base_url(&test_config(None), &server.url())?;
        let deleted = client.delete_command(Scope::Global, "42", "answer").await;

        mock.assert_async().await;
        assert_eq!(deleted, expected);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_guild_command_path() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", format!("{}/7", guild_path()).as_str())
            .with_status(204)
            .create_async()
            .await;

        let client = DiscordClient::new_with_base_url(&test_config(Some(GUILD_ID)), &server.url())?;
        assert!(client.delete_command(Scope::Guild, "7", "local").await);

        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_transport_error_returns_false() -> Result<()> {
        let client = DiscordClient::new_with_base_url(&test_config(None), "http://127.0.0.1:1")?;
        assert!(!client.delete_command(Scope::Global, "42", "answer").await);
        Ok(())
    }

    #[tokio::test]
    async fn test_send_parses_json_and_falls_back_to_text() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let _json = server
            .mock("GET", "/json")
            .with_status(200)
            .with_header("x-ratelimit-remaining", "4")
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;
        let _text = server
            .mock("GET", "/text")
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;
        let _empty = server
            .mock("GET", "/empty")
            .with_status(204)
            .create_async()
            .await;

        let client = DiscordClient::new_with_base_url(&test_config(None), &server.url())?;

        let json = client.send(Method::GET, "/json", None).await?;
        assert_eq!(json.status, StatusCode::OK);
        assert_eq!(json.data, ResponseBody::Json(json!({"ok": true})));
        assert_eq!(
            json.headers.get("x-ratelimit-remaining").and_then(|v| v.to_str().ok()),
            Some("4")
        );

        let text = client.send(Method::GET, "/text", None).await?;
        assert_eq!(text.status, StatusCode::BAD_GATEWAY);
        assert_eq!(text.data, ResponseBody::Text("Bad Gateway".to_string()));

        let empty = client.send(Method::GET, "/empty", None).await?;
        assert_eq!(empty.data, ResponseBody::Empty);

        Ok(())
    }

    #[tokio::test]
    async fn test_send_writes_json_body() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", global_path().as_str())
            .match_body(Matcher::Json(json!({"name": "ping", "description": "Ping"})))
            .with_status(201)
            .with_body(r#"{"id":"5","name":"ping"}"#)
            .create_async()
            .await;

        let client = DiscordClient::new_with_base_url(&test_config(None), &server.url())?;
        let body = json!({"name": "ping", "description": "Ping"});
        let response = client.send(Method::POST, &global_path(), Some(&body)).await?;

        mock.assert_async().await;
        assert_eq!(response.status, StatusCode::CREATED);
        Ok(())
    }
}
