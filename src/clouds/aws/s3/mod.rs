//! A native S3 REST client.

use std::{error, fmt};

use chrono::Utc;
use reqwest::StatusCode;

use super::{signing, AwsCredentials};
use crate::common::*;

/// An error reported by the S3 endpoint.
///
/// The interesting conditions get their own variants so that callers can
/// tell a missing object apart from a permissions problem.
#[derive(Debug)]
pub(crate) enum S3Error {
    /// The bucket or object does not exist.
    NoSuchObject { bucket: String, key: String },
    /// Our credentials were rejected, or lack access to the object.
    AccessDenied { bucket: String, key: String },
    /// Any other error status.
    Other { status: StatusCode, body: String },
}

impl fmt::Display for S3Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            S3Error::NoSuchObject { bucket, key } => {
                write!(f, "no such object s3://{}/{}", bucket, key)
            }
            S3Error::AccessDenied { bucket, key } => {
                write!(f, "access denied to s3://{}/{}", bucket, key)
            }
            S3Error::Other { status, body } => {
                write!(f, "S3 error {}: {}", status, body)
            }
        }
    }
}

impl error::Error for S3Error {}

/// Fetch the full contents of an object with a single signed `GET`. The
/// whole object is buffered in memory.
#[instrument(level = "debug")]
pub(crate) async fn get_object(bucket: &str, key: &str) -> Result<Bytes> {
    let credentials = AwsCredentials::try_default()?;
    let region = super::default_region();
    let (url, host, canonical_path) =
        object_url(bucket, key, &region, super::endpoint_override()?)?;

    let now = Utc::now();
    let amz_date = signing::format_amz_date(now);
    let mut headers = vec![
        ("host".to_owned(), host),
        (
            "x-amz-content-sha256".to_owned(),
            signing::EMPTY_PAYLOAD_SHA256.to_owned(),
        ),
        ("x-amz-date".to_owned(), amz_date.clone()),
    ];
    if let Some(token) = &credentials.session_token {
        headers.push(("x-amz-security-token".to_owned(), token.clone()));
    }
    headers.sort();
    let authorization = signing::sign_request(
        &credentials,
        "GET",
        &canonical_path,
        "",
        &region,
        now,
        signing::EMPTY_PAYLOAD_SHA256,
        &headers,
    )?;

    debug!("GET {}", url);
    let client = reqwest::Client::new();
    let mut req = client
        .get(url.clone())
        .header("x-amz-date", &amz_date)
        .header("x-amz-content-sha256", signing::EMPTY_PAYLOAD_SHA256)
        .header("authorization", &authorization);
    if let Some(token) = &credentials.session_token {
        req = req.header("x-amz-security-token", token);
    }
    let resp = req
        .send()
        .await
        .with_context(|| format!("could not GET {}", url))?;

    let status = resp.status();
    if status.is_success() {
        Ok(resp
            .bytes()
            .await
            .with_context(|| format!("error reading body of {}", url))?)
    } else {
        let body = resp.text().await.unwrap_or_default();
        Err(Error::new(error_for_status(status, bucket, key, body))
            .context(format!("could not GET {}", url)))
    }
}

/// Map an S3 error status to our typed error conditions.
fn error_for_status(
    status: StatusCode,
    bucket: &str,
    key: &str,
    body: String,
) -> S3Error {
    match status {
        StatusCode::NOT_FOUND => S3Error::NoSuchObject {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => S3Error::AccessDenied {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
        },
        _ => S3Error::Other { status, body },
    }
}

/// Build the request URL, `Host` header value, and canonical URI path for
/// an object. Without an endpoint override we use virtual-hosted-style
/// addressing; with one we use path-style, which is what MinIO-style
/// deployments expect.
fn object_url(
    bucket: &str,
    key: &str,
    region: &str,
    endpoint: Option<Url>,
) -> Result<(Url, String, String)> {
    let encoded_key = signing::uri_encode_path(key);
    match endpoint {
        Some(endpoint) => {
            let host = endpoint
                .host_str()
                .ok_or_else(|| format_err!("no host in endpoint {}", endpoint))?;
            let host = match endpoint.port() {
                Some(port) => format!("{}:{}", host, port),
                None => host.to_owned(),
            };
            let canonical_path = format!("/{}/{}", bucket, encoded_key);
            let url = format!(
                "{}://{}{}",
                endpoint.scheme(),
                host,
                canonical_path,
            )
            .parse::<Url>()
            .context("cannot build S3 URL")?;
            Ok((url, host, canonical_path))
        }
        None => {
            let host = format!("{}.s3.{}.amazonaws.com", bucket, region);
            let canonical_path = format!("/{}", encoded_key);
            let url = format!("https://{}{}", host, canonical_path)
                .parse::<Url>()
                .context("cannot build S3 URL")?;
            Ok((url, host, canonical_path))
        }
    }
}
