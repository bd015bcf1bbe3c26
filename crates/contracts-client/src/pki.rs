use async_trait::async_trait;
use contracts_proto::wire::pki::{GetCaRequest, GetCaResponse};
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::metadata::AsciiMetadataValue;
use tonic::transport::Channel;

use crate::{PkiApi, RpcError, lazy_channel};

const GET_CA_PATH: &str = "/wirepact.pki.PkiService/GetCA";

/// Client for the `wirepact.pki.PkiService` of a third-party PKI host.
#[derive(Debug, Clone)]
pub struct PkiClient {
    address: String,
    inner: tonic::client::Grpc<Channel>,
}

impl PkiClient {
    pub fn connect(host: &str) -> Result<Self, RpcError> {
        let (address, channel) = lazy_channel(host)?;
        Ok(Self {
            address,
            inner: tonic::client::Grpc::new(channel),
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Builds the `GetCA` request. Without a token (or with an empty one) the
    /// request carries no `authorization` metadata.
    pub fn ca_request(
        bearer_token: Option<&str>,
    ) -> Result<tonic::Request<GetCaRequest>, RpcError> {
        let mut request = tonic::Request::new(GetCaRequest {});
        if let Some(token) = bearer_token.map(str::trim).filter(|token| !token.is_empty()) {
            let value: AsciiMetadataValue = format!("Bearer {token}")
                .parse()
                .map_err(|_| RpcError::InvalidToken)?;
            request.metadata_mut().insert("authorization", value);
        }
        Ok(request)
    }
}

#[async_trait]
impl PkiApi for PkiClient {
    async fn get_ca(&self, bearer_token: Option<&str>) -> Result<Vec<u8>, RpcError> {
        let request = Self::ca_request(bearer_token)?;
        tracing::info!(address = %self.address, "fetching pki ca certificate");

        let mut client = self.inner.clone();
        client.ready().await.map_err(|error| RpcError::Transport {
            message: format!("channel not ready: {error}"),
        })?;
        let response: tonic::Response<GetCaResponse> = client
            .unary(
                request,
                PathAndQuery::from_static(GET_CA_PATH),
                ProstCodec::default(),
            )
            .await
            .inspect_err(|status| {
                tracing::warn!(
                    address = %self.address,
                    code = ?status.code(),
                    message = status.message(),
                    "pki rpc failed"
                );
            })?;
        Ok(response.into_inner().certificate)
    }
}
