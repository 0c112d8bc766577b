//! Static API key integration tests.

#[cfg(test)]
mod tests {
    use reqwest::{Method, StatusCode};
    use satgate_auth::AuthConfig;

    use crate::{TestGateway, error_message};

    const API_KEY: &str = "dev-key-123";

    async fn gateway() -> TestGateway {
        let auth = AuthConfig::builder().static_key_secret(API_KEY).build();
        TestGateway::spawn(auth).await.unwrap()
    }

    #[tokio::test]
    async fn test_should_admit_matching_key() {
        let gw = gateway().await;

        let resp = gw
            .request(Method::GET, "/v1/satellites")
            .header("x-api-key", API_KEY)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["mechanism"], "static_key");
        assert_eq!(json["open"], false);
    }

    #[tokio::test]
    async fn test_should_reject_missing_or_wrong_key() {
        let gw = gateway().await;

        let resp = gw.request(Method::GET, "/v1/satellites").send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            resp.headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
        assert!(resp.headers().contains_key("x-request-id"));
        assert_eq!(error_message(resp).await, "Unauthorized");

        let resp = gw
            .request(Method::GET, "/v1/satellites")
            .header("x-api-key", "dev-key-124")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_message(resp).await, "Unauthorized");
    }

    #[tokio::test]
    async fn test_should_admit_everything_when_unconfigured() {
        let gw = TestGateway::spawn(AuthConfig::default()).await.unwrap();

        let resp = gw
            .request(Method::DELETE, "/v1/satellites/7")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["open"], true);
    }
}
