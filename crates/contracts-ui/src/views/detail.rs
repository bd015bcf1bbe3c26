use contracts_client::ContractsApi;
use contracts_proto::Contract;
use contracts_proto::domain::sort_participants;
use maud::{Markup, html};

use crate::router::AppRoute;
use crate::widgets::{ConfirmClosed, ConfirmModal, back_link, error_banner, participant_card, spinner};

/// One contract with its participants and the delete action.
#[derive(Debug, Clone)]
pub struct DetailView {
    contract_id: String,
    contract: Option<Contract>,
    confirm: ConfirmModal,
    last_error: Option<String>,
}

impl DetailView {
    pub fn new(contract_id: impl Into<String>) -> Self {
        Self {
            contract_id: contract_id.into(),
            contract: None,
            confirm: ConfirmModal::new("Delete contract", true),
            last_error: None,
        }
    }

    pub fn contract_id(&self) -> &str {
        &self.contract_id
    }

    pub fn contract(&self) -> Option<&Contract> {
        self.contract.as_ref()
    }

    pub fn confirm_dialog(&self) -> &ConfirmModal {
        &self.confirm
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub async fn activate(&mut self, api: &dyn ContractsApi) {
        match api.get(&self.contract_id).await {
            Ok(mut contract) => {
                sort_participants(&mut contract.participants);
                self.contract = Some(contract);
                self.last_error = None;
            }
            Err(error) => {
                tracing::warn!(contract_id = %self.contract_id, error = %error, "fetching contract failed");
                self.last_error = Some(error.to_string());
            }
        }
    }

    /// Opens the confirmation dialog; nothing is sent yet. Ignored until a
    /// contract has been loaded.
    pub fn request_delete(&mut self) {
        if self.contract.is_none() {
            return;
        }
        self.confirm.open(format!(
            "Do you really want to delete the contract \"{}\"?",
            self.contract_id
        ));
    }

    /// Handles the dialog outcome. Returns the route to navigate to once the
    /// delete has completed.
    pub async fn on_dialog_close(
        &mut self,
        outcome: ConfirmClosed,
        api: &dyn ContractsApi,
    ) -> Option<AppRoute> {
        self.confirm.show = false;
        if !outcome.0 {
            return None;
        }

        match api.delete(&self.contract_id).await {
            Ok(()) => {
                tracing::info!(contract_id = %self.contract_id, "contract deleted");
                Some(AppRoute::Home)
            }
            Err(error) => {
                tracing::warn!(contract_id = %self.contract_id, error = %error, "deleting contract failed");
                self.last_error = Some(error.to_string());
                None
            }
        }
    }

    pub fn render(&self) -> Markup {
        html! {
            section class="cr-view cr-detail" {
                (back_link(None))
                div class="cr-view-header" {
                    h1 { "Contract " code { (self.contract_id) } }
                    @if self.contract.is_some() {
                        button type="button" class="cr-btn danger" data-action="delete-contract" { "Delete" }
                    }
                }
                (error_banner(self.last_error.as_deref()))
                @match &self.contract {
                    Some(contract) => {
                        div class="cr-participants" {
                            @for participant in &contract.participants {
                                (participant_card(participant))
                            }
                        }
                    }
                    None => {
                        @if self.last_error.is_none() {
                            (spinner())
                        }
                    }
                }
                (self.confirm.render())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use contracts_client::memory::{ContractsCall, InMemoryContracts};

    use super::*;

    fn seeded() -> (InMemoryContracts, String) {
        let api = InMemoryContracts::new().with_contract(&[("zeta", "z"), ("Alpha", "a"), ("mid", "m")]);
        let id = api.contract_ids().into_iter().next().unwrap_or_default();
        (api, id)
    }

    #[tokio::test]
    async fn participants_render_sorted_by_name() {
        let (api, id) = seeded();
        let mut view = DetailView::new(id);
        assert!(view.render().into_string().contains("cr-spinner"));

        view.activate(&api).await;
        let names: Vec<&str> = view
            .contract()
            .map(|contract| contract.participant_names().collect())
            .unwrap_or_default();
        assert_eq!(names, vec!["Alpha", "mid", "zeta"]);

        let html = view.render().into_string();
        let alpha = html.find("<h3>Alpha</h3>").unwrap_or(usize::MAX);
        let zeta = html.find("<h3>zeta</h3>").unwrap_or(0);
        assert!(alpha < zeta);
        assert!(!html.contains("cr-spinner"));
    }

    #[tokio::test]
    async fn confirming_deletes_once_then_navigates_home() {
        let (api, id) = seeded();
        let mut view = DetailView::new(id.clone());
        view.activate(&api).await;

        view.request_delete();
        assert!(view.confirm_dialog().show);
        assert!(view.render().into_string().contains(&id));

        let outcome = view.confirm_dialog().confirm();
        assert_eq!(outcome, ConfirmClosed(true));
        let navigation = view.on_dialog_close(outcome, &api).await;

        assert_eq!(navigation, Some(AppRoute::Home));
        assert!(!view.confirm_dialog().show);
        let deletes = api
            .calls()
            .into_iter()
            .filter(|call| matches!(call, ContractsCall::Delete(_)))
            .count();
        assert_eq!(deletes, 1);
        assert!(api.contract_ids().is_empty());
    }

    #[tokio::test]
    async fn cancelling_issues_no_call() {
        let (api, id) = seeded();
        let mut view = DetailView::new(id);
        view.request_delete();

        let outcome = view.confirm_dialog().cancel();
        assert_eq!(outcome, ConfirmClosed(false));
        assert_eq!(view.on_dialog_close(outcome, &api).await, None);
        assert!(api.calls().is_empty());
        assert!(!view.confirm_dialog().show);
    }

    #[tokio::test]
    async fn missing_contract_shows_banner() {
        let api = InMemoryContracts::new();
        let mut view = DetailView::new("missing");
        view.activate(&api).await;

        let html = view.render().into_string();
        assert!(html.contains("cr-notice error"));
        assert!(!html.contains("cr-spinner"));
        assert!(!html.contains("data-action=\"delete-contract\""));

        view.request_delete();
        assert!(!view.confirm_dialog().show);
    }

    #[tokio::test]
    async fn delete_button_appears_once_loaded() {
        let (api, id) = seeded();
        let mut view = DetailView::new(id);
        assert!(!view.render().into_string().contains("data-action=\"delete-contract\""));

        view.activate(&api).await;
        assert!(view.render().into_string().contains("data-action=\"delete-contract\""));
    }
}
