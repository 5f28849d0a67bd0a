//! Public URL resolution for published objects.

use tubely_core::StorageConfig;

/// Resolves a storage key to the URL clients fetch it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicUrlResolver {
    /// `https://{bucket}.s3.{region}.amazonaws.com/{key}`
    VirtualHost { bucket: String, region: String },
    /// `https://{host}/{key}`
    Cdn { host: String },
    /// `{endpoint}/{bucket}/{key}` for S3-compatible providers
    PathStyle { endpoint: String, bucket: String },
}

impl PublicUrlResolver {
    /// A configured CDN host wins over a custom endpoint.
    pub fn from_config(config: &StorageConfig) -> Self {
        if let Some(ref host) = config.cdn_host {
            let host = host
                .trim_start_matches("https://")
                .trim_start_matches("http://")
                .trim_end_matches('/');
            return PublicUrlResolver::Cdn {
                host: host.to_string(),
            };
        }

        if let Some(ref endpoint) = config.endpoint {
            return PublicUrlResolver::PathStyle {
                endpoint: endpoint.trim_end_matches('/').to_string(),
                bucket: config.bucket.clone(),
            };
        }

        PublicUrlResolver::VirtualHost {
            bucket: config.bucket.clone(),
            region: config.region.clone(),
        }
    }

    pub fn resolve(&self, key: &str) -> String {
        match self {
            PublicUrlResolver::VirtualHost { bucket, region } => {
                format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key)
            }
            PublicUrlResolver::Cdn { host } => format!("https://{}/{}", host, key),
            PublicUrlResolver::PathStyle { endpoint, bucket } => {
                format!("{}/{}/{}", endpoint, bucket, key)
            }
        }
    }
}
