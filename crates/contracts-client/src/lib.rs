//! Typed gRPC clients for the contract repository.
//!
//! Consumers depend on the [`ContractsApi`], [`PkiApi`] and
//! [`PkiClientFactory`] traits; [`ContractsClient`] and [`PkiClient`] are the
//! `tonic` implementations, [`memory::InMemoryContracts`] the local one.

use async_trait::async_trait;
use contracts_proto::{Contract, ConversionError, CreateContract};
use thiserror::Error;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};

mod contracts;
pub mod memory;
mod pki;

pub use contracts::ContractsClient;
pub use pki::PkiClient;
pub use tonic::Code;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientConfigError {
    #[error("service address is empty")]
    EmptyAddress,
    #[error("unsupported scheme in service address '{address}'")]
    UnsupportedScheme { address: String },
    #[error("invalid service address '{address}': {message}")]
    InvalidAddress { address: String, message: String },
    #[error("tls setup failed for '{address}': {message}")]
    Tls { address: String, message: String },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RpcError {
    #[error(transparent)]
    Config(#[from] ClientConfigError),
    #[error("rpc transport failed: {message}")]
    Transport { message: String },
    #[error("rpc status {code:?}: {message}")]
    Status { code: Code, message: String },
    #[error("malformed rpc response: {0}")]
    Decode(#[from] ConversionError),
    #[error("bearer token is not valid request metadata")]
    InvalidToken,
}

impl RpcError {
    pub fn status(code: Code, message: impl Into<String>) -> Self {
        Self::Status {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> Option<Code> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.code() == Some(Code::NotFound)
    }
}

impl From<tonic::Status> for RpcError {
    fn from(status: tonic::Status) -> Self {
        Self::Status {
            code: status.code(),
            message: status.message().to_string(),
        }
    }
}

impl From<tonic::transport::Error> for RpcError {
    fn from(error: tonic::transport::Error) -> Self {
        Self::Transport {
            message: error.to_string(),
        }
    }
}

/// Operations of `wirepact.contracts.ContractsService`.
#[async_trait]
pub trait ContractsApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Contract>, RpcError>;
    async fn get(&self, id: &str) -> Result<Contract, RpcError>;
    async fn create(&self, request: CreateContract) -> Result<Contract, RpcError>;
    async fn delete(&self, id: &str) -> Result<(), RpcError>;
    /// Certificates of every participant sharing a contract with the holder of
    /// `public_key`.
    async fn get_certificates(&self, public_key: &[u8]) -> Result<Vec<Vec<u8>>, RpcError>;
}

/// Operations of `wirepact.pki.PkiService`.
#[async_trait]
pub trait PkiApi: Send + Sync {
    /// Fetches the CA certificate of the PKI host.
    async fn get_ca(&self, bearer_token: Option<&str>) -> Result<Vec<u8>, RpcError>;
}

/// Builds PKI clients bound to an explicit host.
pub trait PkiClientFactory: Send + Sync {
    fn pki_client(&self, host: &str) -> Result<Box<dyn PkiApi>, RpcError>;
}

/// Creates clients for the primary contracts service and for PKI hosts.
///
/// An empty address resolves to `origin`, the address of the page host's own
/// backend.
#[derive(Debug, Clone)]
pub struct ClientFactory {
    origin: String,
}

impl ClientFactory {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn contracts(&self, address: &str) -> Result<ContractsClient, RpcError> {
        let address = if address.trim().is_empty() {
            self.origin.as_str()
        } else {
            address
        };
        ContractsClient::connect(address)
    }

    pub fn pki(&self, host: &str) -> Result<PkiClient, RpcError> {
        PkiClient::connect(host)
    }
}

impl PkiClientFactory for ClientFactory {
    fn pki_client(&self, host: &str) -> Result<Box<dyn PkiApi>, RpcError> {
        Ok(Box::new(self.pki(host)?))
    }
}

/// Trims the address, strips trailing slashes and assumes `http://` when no
/// scheme is given.
pub fn normalize_address(address: &str) -> Result<String, ClientConfigError> {
    let trimmed = address.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ClientConfigError::EmptyAddress);
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return Ok(trimmed.to_string());
    }
    if trimmed.contains("://") {
        return Err(ClientConfigError::UnsupportedScheme {
            address: trimmed.to_string(),
        });
    }
    Ok(format!("http://{trimmed}"))
}

/// Creates a lazily connecting channel; the handshake happens on first use.
pub(crate) fn lazy_channel(address: &str) -> Result<(String, Channel), ClientConfigError> {
    let url = normalize_address(address)?;
    let mut endpoint =
        Endpoint::from_shared(url.clone()).map_err(|error| ClientConfigError::InvalidAddress {
            address: url.clone(),
            message: error.to_string(),
        })?;
    if url.starts_with("https://") {
        endpoint = endpoint
            .tls_config(ClientTlsConfig::new().with_webpki_roots())
            .map_err(|error| ClientConfigError::Tls {
                address: url.clone(),
                message: error.to_string(),
            })?;
    }
    tracing::debug!(address = %url, "created lazy rpc channel");
    Ok((url, endpoint.connect_lazy()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_are_normalized() {
        assert_eq!(
            normalize_address(" http://example.com/ "),
            Ok("http://example.com".to_string())
        );
        assert_eq!(
            normalize_address("pki.example.com:8080"),
            Ok("http://pki.example.com:8080".to_string())
        );
        assert_eq!(
            normalize_address("https://pki.example.com//"),
            Ok("https://pki.example.com".to_string())
        );
        assert_eq!(normalize_address("  "), Err(ClientConfigError::EmptyAddress));
        assert!(matches!(
            normalize_address("ftp://example.com"),
            Err(ClientConfigError::UnsupportedScheme { .. })
        ));
    }

    #[test]
    fn status_errors_keep_code_and_message() {
        let error = RpcError::from(tonic::Status::not_found("Contract not found."));
        assert!(error.is_not_found());
        assert_eq!(error.code(), Some(Code::NotFound));
        assert_eq!(error.to_string(), "rpc status NotFound: Contract not found.");

        let config = RpcError::from(ClientConfigError::EmptyAddress);
        assert_eq!(config.code(), None);
    }

    #[tokio::test]
    async fn factory_resolves_empty_address_to_origin() -> anyhow::Result<()> {
        let factory = ClientFactory::new("http://repo.internal:50051/");
        let client = factory.contracts("")?;
        assert_eq!(client.address(), "http://repo.internal:50051");

        let explicit = factory.contracts("other:50051")?;
        assert_eq!(explicit.address(), "http://other:50051");
        Ok(())
    }

    #[tokio::test]
    async fn factory_builds_pki_clients_for_explicit_hosts() -> anyhow::Result<()> {
        let factory = ClientFactory::new("");
        let client = factory.pki("https://pki.example.com")?;
        assert_eq!(client.address(), "https://pki.example.com");

        let missing = factory.contracts("");
        assert!(matches!(
            missing,
            Err(RpcError::Config(ClientConfigError::EmptyAddress))
        ));
        Ok(())
    }
}
