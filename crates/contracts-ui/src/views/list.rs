use contracts_client::ContractsApi;
use contracts_proto::Contract;
use contracts_proto::domain::sort_contracts;
use maud::{Markup, html};

use crate::router::{RouteName, url_for};
use crate::widgets::{error_banner, spinner};

/// Every contract of the repository, sorted by identifier.
#[derive(Debug, Clone, Default)]
pub struct ListView {
    contracts: Vec<Contract>,
    loaded: bool,
    last_error: Option<String>,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn activate(&mut self, api: &dyn ContractsApi) {
        match api.list().await {
            Ok(mut contracts) => {
                sort_contracts(&mut contracts);
                self.contracts = contracts;
                self.last_error = None;
            }
            Err(error) => {
                tracing::warn!(error = %error, "listing contracts failed");
                self.contracts.clear();
                self.last_error = Some(error.to_string());
            }
        }
        self.loaded = true;
    }

    pub fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn render(&self) -> Markup {
        let new_url = url_for(RouteName::New, None).unwrap_or_default();
        html! {
            section class="cr-view cr-list" {
                div class="cr-view-header" {
                    h1 { "Contracts" }
                    a class="cr-btn primary" href=(new_url) { "New Contract" }
                }
                (error_banner(self.last_error.as_deref()))
                @if !self.loaded {
                    (spinner())
                } @else {
                    (contract_table(&self.contracts))
                }
            }
        }
    }
}

/// Contract rows with alternating backgrounds. Shared with the page host.
pub fn contract_table(contracts: &[Contract]) -> Markup {
    html! {
        table class="cr-table" {
            thead {
                tr {
                    th { "Contract" }
                    th { "Participants" }
                    th {}
                }
            }
            tbody {
                @if contracts.is_empty() {
                    tr { td colspan="3" class="cr-muted" { "No contracts yet." } }
                }
                @for (index, contract) in contracts.iter().enumerate() {
                    @let detail_url = url_for(RouteName::Detail, Some(&contract.id)).unwrap_or_default();
                    tr class={(if index % 2 == 0 { "cr-row even" } else { "cr-row odd" })} {
                        td { code { (contract.id) } }
                        td { (contract.participant_names().collect::<Vec<_>>().join(", ")) }
                        td { a href=(detail_url) { "Details" } }
                    }
                }
            }
        }
    }
}
