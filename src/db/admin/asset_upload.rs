use crate::config::S3Config;
use crate::db::errors::S3Error;
use crate::traits::ImageStore;
use aws_config::meta::region::RegionProviderChain;
use aws_config::Region;
use aws_sdk_s3::config::{Builder as S3ConfigBuilder, Credentials};
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::primitives::ByteStream;
use futures::future::BoxFuture;
use log::{debug, error};

#[derive(Clone)]
pub struct AssetOperations {
    client: aws_sdk_s3::Client,
    bucket_name: String,
    public_url: String,
}

impl AssetOperations {
    pub async fn new(cfg: &S3Config) -> Result<Self, S3Error> {
        let region_provider = RegionProviderChain::first_try(Region::new(cfg.region.clone()));
        let creds = Credentials::new(
            &cfg.access_key_id,
            &cfg.secret_key,
            None,
            None,
            "custom-provider",
        );

        let config = aws_config::from_env()
            .credentials_provider(creds)
            .endpoint_url(&cfg.endpoint)
            .region(region_provider)
            .load()
            .await;

        let s3_config = S3ConfigBuilder::from(&config)
            .force_path_style(true)
            .build();
        let client = aws_sdk_s3::Client::from_conf(s3_config);
        Ok(Self {
            client,
            bucket_name: cfg.bucket_name.clone(),
            public_url: cfg.public_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn public_url_for(&self, key: &str) -> String {
        format!("{}/{}", self.public_url, key)
    }

    pub async fn put_object(
        &self,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, S3Error> {
        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|err| {
                error!("put_object: failed to store '{}': {:?}", key, err);
                match err {
                    SdkError::ServiceError(e) => {
                        S3Error::S3ServiceError(e.raw().status().to_string())
                    }
                    other => S3Error::S3OperationFailed(other.to_string()),
                }
            })?;

        let url = self.public_url_for(key);
        debug!("put_object: stored '{}' at {}", key, url);
        Ok(url)
    }
}

impl ImageStore for AssetOperations {
    fn upload_image<'a>(
        &'a self,
        key: &'a str,
        content_type: &'a str,
        bytes: Vec<u8>,
    ) -> BoxFuture<'a, Result<String, S3Error>> {
        Box::pin(self.put_object(key, content_type, bytes))
    }
}
