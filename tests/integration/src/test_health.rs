//! Health and routing integration tests.

#[cfg(test)]
mod tests {
    use crate::{endpoint_url, http_client};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_running_status() {
        let client = http_client();
        let response = client
            .get(format!("{}/_ltigate/health", endpoint_url()))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let json: serde_json::Value = response.json().await.unwrap();
        assert_eq!(json["status"], "running");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_not_found_for_unknown_path() {
        let client = http_client();
        let response = client
            .get(format!("{}/nope", endpoint_url()))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 404);
        assert!(response.headers().contains_key("x-request-id"));
    }
}
