use async_trait::async_trait;
use contracts_proto::domain::sort_contracts;
use contracts_proto::wire::contracts::{
    Contract as WireContract, CreateRequest, DeleteRequest, Empty, GetCertificatesRequest,
    GetCertificatesResponse, GetRequest, ListRequest, ListResponse,
};
use contracts_proto::{Contract, CreateContract};
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;

use crate::{ContractsApi, RpcError, lazy_channel};

const LIST_PATH: &str = "/wirepact.contracts.ContractsService/List";
const GET_PATH: &str = "/wirepact.contracts.ContractsService/Get";
const CREATE_PATH: &str = "/wirepact.contracts.ContractsService/Create";
const DELETE_PATH: &str = "/wirepact.contracts.ContractsService/Delete";
const GET_CERTIFICATES_PATH: &str = "/wirepact.contracts.ContractsService/GetCertificates";

/// Client for `wirepact.contracts.ContractsService`.
///
/// Cloning is cheap; clones share the underlying channel.
#[derive(Debug, Clone)]
pub struct ContractsClient {
    address: String,
    inner: tonic::client::Grpc<Channel>,
}

impl ContractsClient {
    pub fn connect(address: &str) -> Result<Self, RpcError> {
        let (address, channel) = lazy_channel(address)?;
        Ok(Self {
            address,
            inner: tonic::client::Grpc::new(channel),
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    async fn unary<Req, Res>(&self, path: &'static str, request: Req) -> Result<Res, RpcError>
    where
        Req: prost::Message + Send + Sync + 'static,
        Res: prost::Message + Default + Send + Sync + 'static,
    {
        let mut client = self.inner.clone();
        client.ready().await.map_err(|error| RpcError::Transport {
            message: format!("channel not ready: {error}"),
        })?;

        let response = client
            .unary(
                tonic::Request::new(request),
                PathAndQuery::from_static(path),
                ProstCodec::default(),
            )
            .await
            .inspect_err(|status| {
                tracing::warn!(
                    rpc = path,
                    code = ?status.code(),
                    message = status.message(),
                    "contracts rpc failed"
                );
            })?;
        Ok(response.into_inner())
    }
}

#[async_trait]
impl ContractsApi for ContractsClient {
    async fn list(&self) -> Result<Vec<Contract>, RpcError> {
        tracing::info!(address = %self.address, "listing contracts");
        let response: ListResponse = self.unary(LIST_PATH, ListRequest {}).await?;
        let mut contracts = response
            .contracts
            .into_iter()
            .map(Contract::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        sort_contracts(&mut contracts);
        Ok(contracts)
    }

    async fn get(&self, id: &str) -> Result<Contract, RpcError> {
        tracing::info!(address = %self.address, contract_id = id, "fetching contract");
        let response: WireContract = self
            .unary(GET_PATH, GetRequest { id: id.to_string() })
            .await?;
        Ok(Contract::try_from(response)?)
    }

    async fn create(&self, request: CreateContract) -> Result<Contract, RpcError> {
        tracing::info!(
            address = %self.address,
            participants = request.participants.len(),
            "creating contract"
        );
        let response: WireContract = self
            .unary(CREATE_PATH, CreateRequest::from(request))
            .await?;
        Ok(Contract::try_from(response)?)
    }

    async fn delete(&self, id: &str) -> Result<(), RpcError> {
        tracing::info!(address = %self.address, contract_id = id, "deleting contract");
        let _: Empty = self
            .unary(DELETE_PATH, DeleteRequest { id: id.to_string() })
            .await?;
        Ok(())
    }

    async fn get_certificates(&self, public_key: &[u8]) -> Result<Vec<Vec<u8>>, RpcError> {
        let response: GetCertificatesResponse = self
            .unary(
                GET_CERTIFICATES_PATH,
                GetCertificatesRequest {
                    public_key: public_key.to_vec(),
                },
            )
            .await?;
        Ok(response.certificates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_paths_follow_service_definition() {
        for path in [
            LIST_PATH,
            GET_PATH,
            CREATE_PATH,
            DELETE_PATH,
            GET_CERTIFICATES_PATH,
        ] {
            assert!(path.starts_with("/wirepact.contracts.ContractsService/"));
            assert_eq!(PathAndQuery::from_static(path).path(), path);
        }
    }

    #[tokio::test]
    async fn unreachable_backend_surfaces_transport_or_status_error() -> anyhow::Result<()> {
        let client = ContractsClient::connect("127.0.0.1:1")?;
        let error = client.list().await.expect_err("nothing listens on port 1");
        assert!(matches!(
            error,
            RpcError::Transport { .. } | RpcError::Status { .. }
        ));
        Ok(())
    }
}
