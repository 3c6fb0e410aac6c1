//! Definitions included by most of the files in this crate.
//!
//! This forms the dialect of Rust we use for implementing the loader
//! pipeline, with an emphasis on `tokio` and structured logging.

#![allow(unused_imports)]

pub(crate) use anyhow::{format_err, Context as _, Error, Result};
pub(crate) use bytes::Bytes;
pub(crate) use futures::{FutureExt, TryFutureExt};
pub(crate) use tracing::{
    debug, debug_span, error, info, instrument, trace, warn, Instrument,
};
pub(crate) use url::Url;

pub(crate) use crate::{
    context::Context, if_exists::IfExists, table::Table, tokio_glue::BoxFuture,
};
