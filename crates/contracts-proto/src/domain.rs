//! Domain-layer types and conversions over the wire contracts.

use std::collections::{BTreeMap, HashMap, HashSet};

use thiserror::Error;

use crate::wire::contracts::{
    Contract as WireContract, CreateRequest as WireCreateRequest,
    Participant as WireParticipant,
};

/// Fewest participants a contract can be created with.
pub const MIN_PARTICIPANTS: usize = 2;

/// Conversion failures between wire payloads, form input, and domain types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("{message}.{field} is required")]
    MissingField {
        message: &'static str,
        field: &'static str,
    },
    #[error("participant #{index} has no {field}")]
    IncompleteParticipant { index: usize, field: &'static str },
    #[error("a contract needs at least {MIN_PARTICIPANTS} participants, got {count}")]
    TooFewParticipants { count: usize },
    #[error("participant name '{name}' is used more than once")]
    DuplicateParticipant { name: String },
}

/// One named party of a contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
    /// Raw certificate bytes, PEM text in practice.
    pub public_key: Vec<u8>,
    /// Digest computed by the backend. Empty for drafts.
    pub hash: String,
}

impl Participant {
    /// Certificate bytes decoded as UTF-8, replacing invalid sequences.
    pub fn certificate_text(&self) -> String {
        String::from_utf8_lossy(&self.public_key).into_owned()
    }

    /// A copy with `name` replaced; every other field is carried over.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// A copy whose certificate holds the UTF-8 bytes of `text`.
    pub fn with_certificate_text(&self, text: &str) -> Self {
        Self {
            public_key: text.as_bytes().to_vec(),
            ..self.clone()
        }
    }

    /// Whether the participant may be submitted as part of a new contract.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.public_key.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contract {
    pub id: String,
    pub participants: Vec<Participant>,
}

impl Contract {
    pub fn participant_names(&self) -> impl Iterator<Item = &str> {
        self.participants.iter().map(|participant| participant.name.as_str())
    }
}

/// Name and PEM certificate pair as bound from the creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pki {
    pub name: String,
    pub public_certificate: String,
}

impl Pki {
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.public_certificate.is_empty()
    }
}

/// A validated "create contract" payload. Participant names are unique keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateContract {
    pub participants: BTreeMap<String, Vec<u8>>,
}

impl CreateContract {
    /// Validates draft participants and builds the name to certificate map.
    pub fn from_participants<'a, I>(participants: I) -> Result<Self, ConversionError>
    where
        I: IntoIterator<Item = &'a Participant>,
    {
        let mut map = BTreeMap::new();
        let mut count = 0;
        for (index, participant) in participants.into_iter().enumerate() {
            count += 1;
            if participant.name.is_empty() {
                return Err(ConversionError::IncompleteParticipant {
                    index,
                    field: "name",
                });
            }
            if participant.public_key.is_empty() {
                return Err(ConversionError::IncompleteParticipant {
                    index,
                    field: "certificate",
                });
            }
            if map
                .insert(participant.name.clone(), participant.public_key.clone())
                .is_some()
            {
                return Err(ConversionError::DuplicateParticipant {
                    name: participant.name.clone(),
                });
            }
        }

        if count < MIN_PARTICIPANTS {
            return Err(ConversionError::TooFewParticipants { count });
        }
        Ok(Self { participants: map })
    }

    /// Validates form-bound PKI entries; certificates are UTF-8 encoded.
    pub fn from_pkis(pkis: &[Pki]) -> Result<Self, ConversionError> {
        let participants: Vec<Participant> = pkis
            .iter()
            .map(|pki| Participant {
                name: pki.name.clone(),
                public_key: pki.public_certificate.as_bytes().to_vec(),
                hash: String::new(),
            })
            .collect();
        Self::from_participants(&participants)
    }
}

/// Whether a list of drafts satisfies the creation precondition.
pub fn can_create<'a, I>(participants: I) -> bool
where
    I: IntoIterator<Item = &'a Participant>,
{
    let mut names = HashSet::new();
    for participant in participants {
        if !participant.is_complete() || !names.insert(participant.name.as_str()) {
            return false;
        }
    }
    names.len() >= MIN_PARTICIPANTS
}

/// Orders contracts ascending by identifier.
pub fn sort_contracts(contracts: &mut [Contract]) {
    contracts.sort_by(|left, right| left.id.cmp(&right.id));
}

/// Orders participants ascending by name.
pub fn sort_participants(participants: &mut [Participant]) {
    participants.sort_by(|left, right| left.name.cmp(&right.name));
}

fn require_non_empty(
    value: &str,
    message: &'static str,
    field: &'static str,
) -> Result<(), ConversionError> {
    if value.trim().is_empty() {
        return Err(ConversionError::MissingField { message, field });
    }
    Ok(())
}

impl TryFrom<WireParticipant> for Participant {
    type Error = ConversionError;

    fn try_from(value: WireParticipant) -> Result<Self, Self::Error> {
        require_non_empty(&value.name, "Participant", "name")?;

        Ok(Self {
            name: value.name,
            public_key: value.public_key,
            hash: value.hash,
        })
    }
}

impl From<Participant> for WireParticipant {
    fn from(value: Participant) -> Self {
        Self {
            name: value.name,
            public_key: value.public_key,
            hash: value.hash,
        }
    }
}

impl TryFrom<WireContract> for Contract {
    type Error = ConversionError;

    fn try_from(value: WireContract) -> Result<Self, Self::Error> {
        require_non_empty(&value.id, "Contract", "id")?;

        let participants = value
            .participants
            .into_iter()
            .map(Participant::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            id: value.id,
            participants,
        })
    }
}

impl From<Contract> for WireContract {
    fn from(value: Contract) -> Self {
        Self {
            id: value.id,
            participants: value.participants.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<CreateContract> for WireCreateRequest {
    fn from(value: CreateContract) -> Self {
        Self {
            participants: value.participants.into_iter().collect::<HashMap<_, _>>(),
        }
    }
}
