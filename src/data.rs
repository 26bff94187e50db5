use crate::model::Game;
use anyhow::{Context, Result};
use reqwest::Client;
use tracing::info;

pub const DEFAULT_URL: &str = "https://api.samuelshi.com/uncbasketball";

/// Outcome of one activation's fetch, as delivered to the UI loop.
pub type FetchResult = Result<Vec<Game>>;

pub struct DataClient {
    client: Client,
    url: String,
}

impl DataClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Single GET, whole body read, then decoded. The status code is not
    /// inspected; an error page simply fails to decode.
    pub async fn fetch_games(&self) -> FetchResult {
        info!(url = %self.url, "Fetching games");
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.url))?;
        let body = resp.bytes().await.context("failed to read response body")?;
        let games = decode_games(&body)?;
        info!(count = games.len(), "Fetched games");
        Ok(games)
    }
}

/// All-or-nothing: one bad record rejects the whole array.
pub fn decode_games(body: &[u8]) -> Result<Vec<Game>> {
    serde_json::from_slice(body).context("failed to decode game list")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const ONE_GAME: &str = r#"[{"id":1,"team":"Men","opponent":"Duke","date":"2025-02-01","isHomeGame":true,"score":{"unc":80,"opponent":70}}]"#;

    /// Answers exactly one HTTP request with `body`, then stops listening.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let rsp = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(rsp.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/uncbasketball")
    }

    fn local_client(url: String) -> DataClient {
        let client = Client::builder().no_proxy().build().unwrap();
        DataClient::with_client(client, url)
    }

    #[test]
    fn test_deserialize_sample() {
        let content = fs::read("uncbasketball_sample.json").expect("Failed to read sample file");
        let games = decode_games(&content).expect("Failed to deserialize");
        assert_eq!(games.len(), 4);
        let ids: Vec<i64> = games.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(games[1].team, "Women");
        assert_eq!(games[1].score_display(), "66 - 71");
    }

    #[test]
    fn missing_score_rejects_whole_batch() {
        let body = r#"[
            {"id":1,"team":"Men","opponent":"Duke","date":"2025-02-01","isHomeGame":true,"score":{"unc":80,"opponent":70}},
            {"id":2,"team":"Women","opponent":"Virginia","date":"2025-02-02","isHomeGame":false}
        ]"#;
        assert!(decode_games(body.as_bytes()).is_err());
    }

    #[test]
    fn wrong_type_rejects_whole_batch() {
        let body = r#"[{"id":"1","team":"Men","opponent":"Duke","date":"2025-02-01","isHomeGame":true,"score":{"unc":80,"opponent":70}}]"#;
        assert!(decode_games(body.as_bytes()).is_err());
    }

    #[test]
    fn empty_array_decodes_to_empty_list() {
        assert!(decode_games(b"[]").unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetches_and_decodes_single_game() {
        let url = serve_once("200 OK", ONE_GAME).await;
        let client = local_client(url);
        let games = client.fetch_games().await.expect("fetch should succeed");
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].result().to_string(), "W");
        assert_eq!(games[0].location_display(), "Home");
    }

    #[tokio::test]
    async fn error_status_with_non_array_body_fails_decode() {
        let url = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;
        let err = local_client(url).fetch_games().await.unwrap_err();
        assert!(format!("{err:#}").contains("failed to decode game list"));
    }

    #[tokio::test]
    async fn connection_refused_is_a_transport_error() {
        // Bind then drop to get a port nothing is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{addr}/uncbasketball");
        let err = local_client(url.clone()).fetch_games().await.unwrap_err();
        assert!(format!("{err:#}").contains(&format!("request to {url} failed")));
    }
}
