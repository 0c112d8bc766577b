//! Signed request integration tests.

#[cfg(test)]
mod tests {
    use reqwest::{Method, StatusCode};
    use satgate_auth::{AuthConfig, Clock, SystemClock};

    use crate::{TestGateway, error_message};

    const SECRET: &str = "s3cr3t";
    const API_KEY: &str = "dev-key-123";

    async fn gateway() -> TestGateway {
        let auth = AuthConfig::builder()
            .static_key_secret(API_KEY)
            .hmac_secret(SECRET)
            .build();
        TestGateway::spawn(auth).await.unwrap()
    }

    #[tokio::test]
    async fn test_should_admit_signed_request_and_forward_body() {
        let gw = gateway().await;

        let resp = gw
            .signed(SECRET, Method::POST, "/v1/telemetry", b"{\"rssi\":-71}")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["mechanism"], "hmac");
        assert_eq!(json["open"], false);
        assert_eq!(json["body"], "{\"rssi\":-71}");
    }

    #[tokio::test]
    async fn test_should_sign_path_without_query_string() {
        let gw = gateway().await;
        let signed = satgate_auth::RequestSigner::new(SECRET).sign(
            "GET",
            "/v1/satellites",
            b"",
            SystemClock.now_secs(),
        );

        let resp = gw
            .request(Method::GET, "/v1/satellites?limit=10")
            .header("x-timestamp", signed.timestamp)
            .header("x-signature", signed.signature)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_should_reject_tampered_body() {
        let gw = gateway().await;
        let signed = satgate_auth::RequestSigner::new(SECRET).sign(
            "POST",
            "/v1/telemetry",
            b"{\"rssi\":-71}",
            SystemClock.now_secs(),
        );

        let resp = gw
            .request(Method::POST, "/v1/telemetry")
            .header("x-timestamp", signed.timestamp)
            .header("x-signature", signed.signature)
            .body("{\"rssi\":-10}")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_message(resp).await, "Invalid signature");
    }

    #[tokio::test]
    async fn test_should_reject_stale_timestamp() {
        let gw = gateway().await;
        let stale = SystemClock.now_secs() - 3600;

        let resp = gw
            .signed_at(SECRET, Method::GET, "/v1/satellites", b"", stale)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_message(resp).await, "Timestamp outside allowed window");
    }

    #[tokio::test]
    async fn test_should_reject_malformed_timestamp() {
        let gw = gateway().await;

        let resp = gw
            .request(Method::GET, "/v1/satellites")
            .header("x-timestamp", "yesterday")
            .header("x-signature", "AAAA")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_message(resp).await, "Invalid timestamp");
    }

    #[tokio::test]
    async fn test_should_not_downgrade_to_static_key() {
        let gw = gateway().await;

        let resp = gw
            .request(Method::GET, "/v1/satellites")
            .header("x-api-key", API_KEY)
            .header("x-timestamp", SystemClock.now_secs().to_string())
            .header("x-signature", "bm90LWEtc2lnbmF0dXJl")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_message(resp).await, "Invalid signature");
    }

    #[tokio::test]
    async fn test_should_ignore_signature_when_no_secret_configured() {
        let auth = AuthConfig::builder().static_key_secret(API_KEY).build();
        let gw = TestGateway::spawn(auth).await.unwrap();

        let resp = gw
            .request(Method::GET, "/v1/satellites")
            .header("x-api-key", API_KEY)
            .header("x-timestamp", "garbage")
            .header("x-signature", "garbage")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["mechanism"], "static_key");
    }
}
