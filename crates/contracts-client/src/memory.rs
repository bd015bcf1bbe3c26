//! In-process contracts service used by tests and local runs.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use contracts_proto::domain::sort_contracts;
use contracts_proto::{Contract, CreateContract, Participant};
use sha2::{Digest, Sha256};
use tonic::Code;

use crate::{ContractsApi, RpcError};

/// A call observed by [`InMemoryContracts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractsCall {
    List,
    Get(String),
    Create(Vec<String>),
    Delete(String),
    GetCertificates,
}

#[derive(Debug, Default)]
struct State {
    contracts: BTreeMap<String, Contract>,
    calls: Vec<ContractsCall>,
    next_failure: Option<RpcError>,
}

/// Contracts service backed by a map, computing identifiers and digests the
/// same way the repository backend does.
#[derive(Debug, Default)]
pub struct InMemoryContracts {
    state: Mutex<State>,
}

impl InMemoryContracts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a contract built from `(name, certificate)` pairs.
    pub fn with_contract(self, participants: &[(&str, &str)]) -> Self {
        let map: BTreeMap<String, Vec<u8>> = participants
            .iter()
            .map(|(name, certificate)| ((*name).to_string(), certificate.as_bytes().to_vec()))
            .collect();
        let contract = participants_to_contract(&map);
        self.lock()
            .contracts
            .insert(contract.id.clone(), contract);
        self
    }

    /// Makes the next call fail with `error`.
    pub fn fail_next(&self, error: RpcError) {
        self.lock().next_failure = Some(error);
    }

    pub fn calls(&self) -> Vec<ContractsCall> {
        self.lock().calls.clone()
    }

    pub fn contract_ids(&self) -> Vec<String> {
        self.lock().contracts.keys().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, call: ContractsCall) -> Result<MutexGuard<'_, State>, RpcError> {
        let mut state = self.lock();
        state.calls.push(call);
        match state.next_failure.take() {
            Some(error) => Err(error),
            None => Ok(state),
        }
    }
}

#[async_trait]
impl ContractsApi for InMemoryContracts {
    async fn list(&self) -> Result<Vec<Contract>, RpcError> {
        let state = self.begin(ContractsCall::List)?;
        let mut contracts: Vec<Contract> = state.contracts.values().cloned().collect();
        sort_contracts(&mut contracts);
        Ok(contracts)
    }

    async fn get(&self, id: &str) -> Result<Contract, RpcError> {
        let state = self.begin(ContractsCall::Get(id.to_string()))?;
        state
            .contracts
            .get(id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, request: CreateContract) -> Result<Contract, RpcError> {
        let names = request.participants.keys().cloned().collect();
        let mut state = self.begin(ContractsCall::Create(names))?;
        let contract = participants_to_contract(&request.participants);
        if state.contracts.contains_key(&contract.id) {
            return Err(RpcError::status(
                Code::AlreadyExists,
                "Contract already exists.",
            ));
        }
        state
            .contracts
            .insert(contract.id.clone(), contract.clone());
        Ok(contract)
    }

    async fn delete(&self, id: &str) -> Result<(), RpcError> {
        let mut state = self.begin(ContractsCall::Delete(id.to_string()))?;
        state
            .contracts
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    async fn get_certificates(&self, public_key: &[u8]) -> Result<Vec<Vec<u8>>, RpcError> {
        let state = self.begin(ContractsCall::GetCertificates)?;
        let wanted = participant_hash(public_key);
        let mut seen = HashSet::new();
        Ok(state
            .contracts
            .values()
            .filter(|contract| {
                contract
                    .participants
                    .iter()
                    .any(|participant| participant.hash == wanted)
            })
            .flat_map(|contract| contract.participants.iter())
            .filter(|participant| seen.insert(participant.hash.clone()))
            .map(|participant| participant.public_key.clone())
            .collect())
    }
}

fn not_found(id: &str) -> RpcError {
    RpcError::status(Code::NotFound, format!("Contract with id '{id}' not found"))
}

/// Hex encoded SHA-256 digest of a participant certificate.
pub fn participant_hash(public_key: &[u8]) -> String {
    hex::encode(Sha256::digest(public_key))
}

/// Builds a contract whose id is the digest over all names and certificates
/// in name order, so equal participant sets always map to the same id.
pub fn participants_to_contract(participants: &BTreeMap<String, Vec<u8>>) -> Contract {
    let mut hasher = Sha256::new();
    let mut members = Vec::with_capacity(participants.len());
    for (name, public_key) in participants {
        hasher.update(name.as_bytes());
        hasher.update(public_key);
        members.push(Participant {
            name: name.clone(),
            public_key: public_key.clone(),
            hash: participant_hash(public_key),
        });
    }
    Contract {
        id: hex::encode(hasher.finalize()),
        participants: members,
    }
}
