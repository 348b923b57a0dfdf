//! Live TLS probe: handshake on port 443 and read the issuer organization

use async_trait::async_trait;
use eyre::{eyre, Result};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info};
use x509_parser::prelude::*;

use super::TlsProbe;
use crate::utils::constants::{TLS_PORT, TLS_PROBE_TIMEOUT_SECS};

pub struct NativeTlsProbe {
    timeout: Duration,
    port: u16,
}

impl Default for NativeTlsProbe {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(TLS_PROBE_TIMEOUT_SECS),
            port: TLS_PORT,
        }
    }
}

impl NativeTlsProbe {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

/// Issuer `O=` of a DER certificate; empty when the issuer has none
pub fn issuer_organization(der: &[u8]) -> Result<String> {
    let (_, cert) =
        parse_x509_certificate(der).map_err(|e| eyre!("Invalid peer certificate: {}", e))?;

    let org = cert
        .issuer()
        .iter_organization()
        .filter_map(|attr| attr.as_str().ok())
        .next()
        .unwrap_or_default()
        .to_string();
    Ok(org)
}

#[async_trait]
impl TlsProbe for NativeTlsProbe {
    async fn probe_issuer(&self, domain: &str) -> Result<String> {
        debug!("TLS probe {}:{}", domain, self.port);

        let handshake = async {
            let tcp = TcpStream::connect((domain, self.port))
                .await
                .map_err(|e| eyre!("{}", e))?;
            let connector = native_tls::TlsConnector::new().map_err(|e| eyre!("{}", e))?;
            let connector = tokio_native_tls::TlsConnector::from(connector);
            connector
                .connect(domain, tcp)
                .await
                .map_err(|e| eyre!("{}", e))
        };

        let stream = timeout(self.timeout, handshake)
            .await
            .map_err(|_| eyre!("timed out"))??;

        let cert = stream
            .get_ref()
            .peer_certificate()
            .map_err(|e| eyre!("{}", e))?
            .ok_or_else(|| eyre!("no peer certificate"))?;
        let der = cert.to_der().map_err(|e| eyre!("{}", e))?;
        let issuer = issuer_organization(&der)?;

        info!("🔒 TLS: {} issued by '{}'", domain, issuer);
        Ok(issuer)
    }
}
