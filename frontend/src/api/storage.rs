use reqwest::header::CONTENT_TYPE;

use super::{client::ApiClient, types::ApiError};

pub fn public_object_url(base_url: &str, bucket: &str, key: &str) -> String {
    format!("{}/storage/v1/object/public/{}/{}", base_url, bucket, key)
}

impl ApiClient {
    /// Uploads `bytes` under `bucket/key` without overwriting existing objects.
    pub async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ApiError> {
        let cfg = self.resolved_config().await;
        let headers = self.headers(&cfg)?;
        let response = self
            .execute(
                self.http_client()
                    .post(format!(
                        "{}/storage/v1/object/{}/{}",
                        cfg.supabase_url, bucket, key
                    ))
                    .headers(headers)
                    .header(CONTENT_TYPE, content_type)
                    .header("cache-control", "max-age=3600")
                    .header("x-upsert", "false")
                    .body(bytes),
            )
            .await?;
        Self::expect_success(response).await
    }

    pub async fn public_url(&self, bucket: &str, key: &str) -> String {
        let cfg = self.resolved_config().await;
        public_object_url(&cfg.supabase_url, bucket, key)
    }
}

#[cfg(test)]
mod tests {
    use super::public_object_url;

    #[test]
    fn public_url_points_at_public_object_route() {
        assert_eq!(
            public_object_url("https://demo.supabase.co", "profile_photos", "p.jpg"),
            "https://demo.supabase.co/storage/v1/object/public/profile_photos/p.jpg"
        );
    }
}
