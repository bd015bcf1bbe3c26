//! Proto wire messages.
//!
//! Tag numbers must match the service definitions exactly for wire
//! compatibility with the repository backend and PKI hosts.

/// Messages of the `wirepact.contracts` package.
pub mod contracts {
    use std::collections::HashMap;

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct Participant {
        #[prost(string, tag = "1")]
        pub name: String,
        /// PEM encoded public certificate.
        #[prost(bytes = "vec", tag = "2")]
        pub public_key: Vec<u8>,
        /// SHA-256 digest of the certificate, computed by the backend.
        #[prost(string, tag = "3")]
        pub hash: String,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct Contract {
        #[prost(string, tag = "1")]
        pub id: String,
        #[prost(message, repeated, tag = "2")]
        pub participants: Vec<Participant>,
    }

    #[derive(Clone, Copy, PartialEq, prost::Message)]
    pub struct ListRequest {}

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct ListResponse {
        #[prost(message, repeated, tag = "1")]
        pub contracts: Vec<Contract>,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct GetRequest {
        #[prost(string, tag = "1")]
        pub id: String,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct CreateRequest {
        /// Participant name to PEM certificate bytes.
        #[prost(map = "string, bytes", tag = "1")]
        pub participants: HashMap<String, Vec<u8>>,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct DeleteRequest {
        #[prost(string, tag = "1")]
        pub id: String,
    }

    #[derive(Clone, Copy, PartialEq, prost::Message)]
    pub struct Empty {}

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct GetCertificatesRequest {
        #[prost(bytes = "vec", tag = "1")]
        pub public_key: Vec<u8>,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct GetCertificatesResponse {
        #[prost(bytes = "vec", repeated, tag = "1")]
        pub certificates: Vec<Vec<u8>>,
    }
}

/// Messages of the `wirepact.pki` package.
pub mod pki {
    #[derive(Clone, Copy, PartialEq, prost::Message)]
    pub struct GetCaRequest {}

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct GetCaResponse {
        /// PEM encoded CA certificate of the PKI host.
        #[prost(bytes = "vec", tag = "1")]
        pub certificate: Vec<u8>,
    }
}

#[cfg(test)]
mod tests {
    use prost::Message;

    use super::contracts::{Contract, CreateRequest, Participant};

    #[test]
    fn create_request_encodes_participant_map() {
        let mut request = CreateRequest::default();
        request
            .participants
            .insert("pki_a".to_string(), b"-----BEGIN CERTIFICATE-----".to_vec());

        let bytes = request.encode_to_vec();
        let decoded = CreateRequest::decode(bytes.as_slice()).expect("decode create request");
        assert_eq!(
            decoded.participants.get("pki_a").map(Vec::as_slice),
            Some(b"-----BEGIN CERTIFICATE-----".as_slice())
        );
    }

    #[test]
    fn contract_field_tags_are_stable() {
        let contract = Contract {
            id: "a".to_string(),
            participants: vec![Participant {
                name: "b".to_string(),
                public_key: vec![0x63],
                hash: "d".to_string(),
            }],
        };

        // id (1, len 1), participants (2, len 9: name 1, public_key 2, hash 3).
        assert_eq!(
            contract.encode_to_vec(),
            vec![
                0x0a, 0x01, b'a', 0x12, 0x09, 0x0a, 0x01, b'b', 0x12, 0x01, 0x63, 0x1a, 0x01,
                b'd',
            ]
        );
    }
}
