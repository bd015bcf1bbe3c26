use std::collections::BTreeMap;

use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use contracts_client::RpcError;
use contracts_proto::domain::{sort_contracts, sort_participants};
use contracts_proto::{CreateContract, Pki};
use contracts_ui::{AppRoute, RouteName, url_for};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::AppState;
use crate::web_maud::{ADD_PKI_FIELD, WebBody, WebPage, render_page};

const DEFAULT_DRAFTS: usize = 2;
const MAX_DRAFTS: usize = 32;

#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Rpc(#[from] RpcError),
    #[error("unexpected form field '{field}'")]
    MalformedField { field: String },
}

impl PageError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Rpc(error) if error.is_not_found() => StatusCode::NOT_FOUND,
            Self::Rpc(_) => StatusCode::BAD_GATEWAY,
            Self::MalformedField { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn heading(&self) -> &'static str {
        match self {
            Self::Rpc(error) if error.is_not_found() => "Not found",
            Self::Rpc(_) => "Contract repository unavailable",
            Self::MalformedField { .. } => "Invalid form",
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::BAD_GATEWAY {
            warn!(error = %self, "contract repository call failed");
        }
        let page = WebPage {
            title: self.heading().to_string(),
            route: AppRoute::NotFound {
                path: String::new(),
            },
            body: WebBody::Error {
                heading: self.heading().to_string(),
                message: self.to_string(),
            },
        };
        (status, Html(render_page(&page))).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NewContractQuery {
    drafts: Option<String>,
}

impl NewContractQuery {
    /// Empty slots to render; anything unparsable falls back to the default.
    fn draft_count(&self) -> usize {
        self.drafts
            .as_deref()
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_DRAFTS)
            .clamp(1, MAX_DRAFTS)
    }
}

pub async fn contract_list(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let mut contracts = state.contracts.list().await?;
    sort_contracts(&mut contracts);
    info!(count = contracts.len(), "rendering contract list");

    Ok(Html(render_page(&WebPage {
        title: "Contracts".to_string(),
        route: AppRoute::Home,
        body: WebBody::ContractList { contracts },
    })))
}

pub async fn contract_detail(
    State(state): State<AppState>,
    Path(contract_id): Path<String>,
) -> Result<Html<String>, PageError> {
    let mut contract = state.contracts.get(&contract_id).await?;
    sort_participants(&mut contract.participants);
    info!(contract_id = %contract.id, "rendering contract detail");

    Ok(Html(render_page(&WebPage {
        title: format!("Contract {}", contract.id),
        route: AppRoute::detail(contract.id.clone()),
        body: WebBody::ContractDetail { contract },
    })))
}

pub async fn delete_contract(
    State(state): State<AppState>,
    Path(contract_id): Path<String>,
) -> Result<Redirect, PageError> {
    state.contracts.delete(&contract_id).await?;
    info!(contract_id = %contract_id, "deleted contract");
    Ok(Redirect::to(&home_url()))
}

pub async fn new_contract_form(Query(query): Query<NewContractQuery>) -> Html<String> {
    let pkis = vec![Pki::default(); query.draft_count()];
    Html(new_contract_page(pkis, None))
}

pub async fn create_contract(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response, PageError> {
    let PkiForm { mut pkis, add_slot } = parse_pki_form(&fields)?;
    if add_slot {
        if pkis.len() < MAX_DRAFTS {
            pkis.push(Pki::default());
        }
        return Ok(Html(new_contract_page(pkis, None)).into_response());
    }

    let filled: Vec<Pki> = pkis.iter().filter(|pki| !is_blank(pki)).cloned().collect();

    let request = match CreateContract::from_pkis(&filled) {
        Ok(request) => request,
        Err(error) => {
            info!(error = %error, "rejected contract form");
            if pkis.len() < DEFAULT_DRAFTS {
                pkis.resize(DEFAULT_DRAFTS, Pki::default());
            }
            let body = new_contract_page(pkis, Some(error.to_string()));
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response());
        }
    };

    let contract = state.contracts.create(request).await?;
    info!(contract_id = %contract.id, participants = contract.participants.len(), "created contract");
    Ok(Redirect::to(&home_url()).into_response())
}

fn new_contract_page(pkis: Vec<Pki>, status: Option<String>) -> String {
    render_page(&WebPage {
        title: "New Contract".to_string(),
        route: AppRoute::New,
        body: WebBody::NewContract { pkis, status },
    })
}

fn home_url() -> String {
    url_for(RouteName::Home, None).unwrap_or_else(|| "/".to_string())
}

fn is_blank(pki: &Pki) -> bool {
    pki.name.trim().is_empty() && pki.public_certificate.trim().is_empty()
}

enum PkiField {
    Name,
    PublicCertificate,
}

/// A submitted creation form.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PkiForm {
    pub pkis: Vec<Pki>,
    /// Set by the "Add PKI manually" button: re-render with one more slot
    /// instead of creating.
    pub add_slot: bool,
}

/// Binds `pkis[i].name` / `pkis[i].public_certificate` pairs. Indices may be
/// sparse; entries come back ordered by index.
pub fn parse_pki_form(fields: &[(String, String)]) -> Result<PkiForm, PageError> {
    let mut entries: BTreeMap<usize, Pki> = BTreeMap::new();
    let mut add_slot = false;
    for (key, value) in fields {
        if key == ADD_PKI_FIELD {
            add_slot = true;
            continue;
        }
        let (index, field) = parse_field_name(key).ok_or_else(|| PageError::MalformedField {
            field: key.clone(),
        })?;
        let entry = entries.entry(index).or_default();
        match field {
            PkiField::Name => entry.name.clone_from(value),
            PkiField::PublicCertificate => entry.public_certificate.clone_from(value),
        }
    }
    Ok(PkiForm {
        pkis: entries.into_values().collect(),
        add_slot,
    })
}

fn parse_field_name(key: &str) -> Option<(usize, PkiField)> {
    let rest = key.strip_prefix("pkis[")?;
    let (index, field) = rest.split_once("].")?;
    let index = index.parse::<usize>().ok()?;
    let field = match field {
        "name" => PkiField::Name,
        "public_certificate" => PkiField::PublicCertificate,
        _ => return None,
    };
    Some((index, field))
}

#[cfg(test)]
mod tests {
    use contracts_client::Code;

    use super::*;

    fn field(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn sparse_indices_are_ordered() -> Result<(), PageError> {
        let form = parse_pki_form(&[
            field("pkis[7].public_certificate", "cert-b"),
            field("pkis[2].name", "A"),
            field("pkis[7].name", "B"),
            field("pkis[2].public_certificate", "cert-a"),
        ])?;

        assert!(!form.add_slot);
        assert_eq!(
            form.pkis,
            vec![
                Pki {
                    name: "A".to_string(),
                    public_certificate: "cert-a".to_string(),
                },
                Pki {
                    name: "B".to_string(),
                    public_certificate: "cert-b".to_string(),
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn add_button_is_not_a_pki_field() -> Result<(), PageError> {
        let form = parse_pki_form(&[field("pkis[0].name", "A"), field(ADD_PKI_FIELD, "1")])?;
        assert!(form.add_slot);
        assert_eq!(form.pkis.len(), 1);
        Ok(())
    }

    #[test]
    fn unknown_fields_are_malformed() {
        for key in ["pkis[x].name", "pkis[0].hash", "participants", "pkis[0]name"] {
            let error = parse_pki_form(&[field(key, "v")]);
            assert!(
                matches!(error, Err(PageError::MalformedField { ref field }) if field == key),
                "{key} should be rejected"
            );
        }
    }

    #[test]
    fn draft_count_defaults_and_clamps() {
        let query = |drafts: Option<&str>| NewContractQuery {
            drafts: drafts.map(str::to_string),
        };
        assert_eq!(query(None).draft_count(), 2);
        assert_eq!(query(Some("abc")).draft_count(), 2);
        assert_eq!(query(Some("5")).draft_count(), 5);
        assert_eq!(query(Some("0")).draft_count(), 1);
        assert_eq!(query(Some("10000")).draft_count(), MAX_DRAFTS);
    }

    #[test]
    fn rpc_errors_map_to_page_statuses() {
        let not_found = PageError::from(RpcError::status(Code::NotFound, "Contract not found."));
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let unavailable = PageError::from(RpcError::status(Code::Unavailable, "down"));
        assert_eq!(unavailable.status(), StatusCode::BAD_GATEWAY);

        let malformed = PageError::MalformedField {
            field: "x".to_string(),
        };
        assert_eq!(malformed.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
