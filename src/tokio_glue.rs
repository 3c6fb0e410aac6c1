//! Glue code for working with `tokio`'s async ecosystem.

use crate::common::*;

/// A boxed future which returns a `Result`, using the standard error type
/// for this crate.
pub(crate) type BoxFuture<T> = futures::future::BoxFuture<'static, Result<T>>;
