//! Clients for cloud services.

pub(crate) mod aws;
