//! The S3 source driver.

use std::{fmt, str::FromStr};

use crate::clouds::aws::s3::get_object;
use crate::common::*;

/// An `s3://bucket/key` URL pointing at a single object.
///
/// Bucket and key are opaque strings; the key must name an object, not a
/// directory-like prefix.
#[derive(Clone, Debug)]
pub(crate) struct S3Locator {
    bucket: String,
    key: String,
}

impl S3Locator {
    /// The URL scheme used by this driver.
    pub(crate) fn scheme() -> &'static str {
        "s3://"
    }

    /// The bucket this locator points into.
    pub(crate) fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The object key, without the leading `/`.
    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    /// Fetch the raw bytes of the object this locator points at.
    pub(crate) async fn fetch_data(&self) -> Result<Bytes> {
        get_object(self.bucket(), self.key()).await
    }
}

impl fmt::Display for S3Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}/{}", Self::scheme(), self.bucket, self.key)
    }
}

impl FromStr for S3Locator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let rest = s
            .strip_prefix(Self::scheme())
            .ok_or_else(|| format_err!("expected {} to begin with s3://", s))?;
        let (bucket, key) = rest
            .split_once('/')
            .ok_or_else(|| format_err!("{} must name a bucket and an object key", s))?;
        if bucket.is_empty() {
            Err(format_err!("{} has an empty bucket name", s))
        } else if key.is_empty() || key.ends_with('/') {
            Err(format_err!("{} must name a single object, not a directory", s))
        } else {
            Ok(S3Locator {
                bucket: bucket.to_owned(),
                key: key.to_owned(),
            })
        }
    }
}
