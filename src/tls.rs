//! Support for setting up RusTLS in a consistent fashion.

use rustls::{ClientConfig, RootCertStore};
use rustls_native_certs::load_native_certs;

use crate::common::*;

/// Install the process-wide TLS crypto provider.
///
/// Both `reqwest` and `tokio-postgres-rustls` build on `rustls`, which
/// refuses to guess which crypto backend to use when more than one is
/// compiled in. Call this once at startup, before opening any connections.
pub(crate) fn install_default_crypto_provider() {
    if rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .is_err()
    {
        debug!("TLS crypto provider was already installed");
    }
}

/// Standard RusTLS `ClientConfig` setup.
pub(crate) fn rustls_client_config() -> Result<ClientConfig> {
    let mut root_store = RootCertStore::empty();
    let cert_result = load_native_certs();
    for cert in cert_result.certs {
        root_store
            .add(cert)
            .context("could not add certificate to cert store")?;
    }
    if let Some(err) = cert_result.errors.into_iter().next() {
        return Err(err).context("error loading native certs");
    }

    Ok(ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth())
}
