//! Launch validation integration tests.

#[cfg(test)]
mod tests {
    use crate::{credentials, http_client, launch_params, launch_url, post_launch, sign_launch};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_accept_signed_launch() {
        let client = http_client();
        let creds = credentials();
        let params = sign_launch(launch_params(&creds, "u42"), &creds).unwrap();

        let response = post_launch(&client, &params).await.unwrap();
        assert_eq!(response.status(), 200);

        let json: serde_json::Value = response.json().await.unwrap();
        assert_eq!(json["user_id"], "u42");
        assert_eq!(json["email"], "ada@example.com");
        assert_eq!(json["display_name"], "Ada Lovelace");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_tampered_launch() {
        let client = http_client();
        let creds = credentials();
        let mut params = sign_launch(launch_params(&creds, "u42"), &creds).unwrap();
        for (name, value) in &mut params {
            if name == "user_id" {
                *value = "admin".to_owned();
            }
        }

        let response = post_launch(&client, &params).await.unwrap();
        assert_eq!(response.status(), 401);

        let json: serde_json::Value = response.json().await.unwrap();
        assert_eq!(json["error"], "invalid_credentials");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_foreign_consumer_key() {
        let client = http_client();
        let foreign = ltigate_auth::Credentials::new("someone-else", "their-secret");
        let params = sign_launch(launch_params(&foreign, "u42"), &foreign).unwrap();

        let response = post_launch(&client, &params).await.unwrap();
        assert_eq!(response.status(), 400);

        let json: serde_json::Value = response.json().await.unwrap();
        assert_eq!(json["message"], "Invalid request");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_launch_without_resource_link() {
        let client = http_client();
        let creds = credentials();
        let params: Vec<_> = launch_params(&creds, "u42")
            .into_iter()
            .filter(|(name, _)| name != "resource_link_id")
            .collect();
        let params = sign_launch(params, &creds).unwrap();

        let response = post_launch(&client, &params).await.unwrap();
        assert_eq!(response.status(), 400);

        let json: serde_json::Value = response.json().await.unwrap();
        assert_eq!(json["message"], "Malformed LTI launch request");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_get_launch() {
        let client = http_client();
        let response = client.get(launch_url()).send().await.unwrap();

        assert_eq!(response.status(), 400);
        let json: serde_json::Value = response.json().await.unwrap();
        assert_eq!(json["message"], "Unsupported method");
    }
}
