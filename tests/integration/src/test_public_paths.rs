//! Public path allow-list integration tests.

#[cfg(test)]
mod tests {
    use reqwest::{Method, StatusCode};
    use satgate_auth::AuthConfig;

    use crate::TestGateway;

    async fn gateway() -> TestGateway {
        let auth = AuthConfig::builder()
            .static_key_secret("dev-key-123")
            .hmac_secret("s3cr3t")
            .build();
        TestGateway::spawn(auth).await.unwrap()
    }

    #[tokio::test]
    async fn test_should_bypass_auth_for_public_prefixes() {
        let gw = gateway().await;

        for path in ["/health", "/healthz", "/swagger/index.html", "/favicon.ico"] {
            let resp = gw.request(Method::GET, path).send().await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK, "path {path}");
            let json: serde_json::Value = resp.json().await.unwrap();
            assert_eq!(json["mechanism"], "none", "path {path}");
        }
    }

    #[tokio::test]
    async fn test_should_ignore_bad_credentials_on_public_paths() {
        let gw = gateway().await;

        let resp = gw
            .request(Method::GET, "/health")
            .header("x-api-key", "wrong")
            .header("x-timestamp", "never")
            .header("x-signature", "bogus")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_should_protect_lookalike_paths() {
        let gw = gateway().await;

        let resp = gw
            .request(Method::GET, "/healthcheck-admin")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
