//! AWS authentication and configuration.

use std::env;

use crate::common::*;

pub(crate) mod s3;
pub(crate) mod signing;

/// Credentials used to access S3.
pub(crate) struct AwsCredentials {
    /// The value of `AWS_ACCESS_KEY_ID`.
    pub(crate) access_key_id: String,
    /// The value of `AWS_SECRET_ACCESS_KEY`.
    pub(crate) secret_access_key: String,
    /// The value of `AWS_SESSION_TOKEN`.
    pub(crate) session_token: Option<String>,
}

impl AwsCredentials {
    /// Look up our AWS credentials in the environment.
    pub(crate) fn try_default() -> Result<AwsCredentials> {
        let access_key_id = required_var("AWS_ACCESS_KEY_ID")?;
        let secret_access_key = required_var("AWS_SECRET_ACCESS_KEY")?;
        let session_token = optional_var("AWS_SESSION_TOKEN");
        Ok(AwsCredentials {
            access_key_id,
            secret_access_key,
            session_token,
        })
    }
}

/// The AWS region to sign requests for.
pub(crate) fn default_region() -> String {
    optional_var("AWS_REGION")
        .or_else(|| optional_var("AWS_DEFAULT_REGION"))
        .unwrap_or_else(|| "us-east-1".to_owned())
}

/// An optional custom S3 endpoint, for MinIO-style deployments.
pub(crate) fn endpoint_override() -> Result<Option<Url>> {
    match optional_var("AWS_ENDPOINT_URL") {
        Some(s) => Ok(Some(
            s.parse::<Url>().context("cannot parse AWS_ENDPOINT_URL")?,
        )),
        None => Ok(None),
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).map_err(|_| format_err!("please set {}", name))
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}
