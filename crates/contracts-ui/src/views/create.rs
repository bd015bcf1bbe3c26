use std::sync::Arc;

use contracts_client::{ContractsApi, PkiClientFactory};
use contracts_proto::domain::can_create;
use contracts_proto::{CreateContract, Participant};
use maud::{Markup, html};

use super::certificate_fetch::{CertificateFetchModal, FetchClosed};
use crate::ids::ElementIds;
use crate::router::AppRoute;
use crate::widgets::{ParticipantForm, ParticipantFormEvent, back_link, error_banner};

/// Composes a new contract from draft participants.
///
/// `drafts` and `forms` always have the same length; index `i` of one
/// belongs to index `i` of the other.
#[derive(Debug, Clone)]
pub struct CreateView {
    ids: ElementIds,
    drafts: Vec<Arc<Participant>>,
    forms: Vec<ParticipantForm>,
    fetch: CertificateFetchModal,
    saving: bool,
    last_error: Option<String>,
}

impl CreateView {
    pub fn new(ids: ElementIds) -> Self {
        let fetch = CertificateFetchModal::new(&ids);
        Self {
            ids,
            drafts: Vec::new(),
            forms: Vec::new(),
            fetch,
            saving: false,
            last_error: None,
        }
    }

    pub fn drafts(&self) -> &[Arc<Participant>] {
        &self.drafts
    }

    pub fn fetch_modal(&self) -> &CertificateFetchModal {
        &self.fetch
    }

    pub fn fetch_modal_mut(&mut self) -> &mut CertificateFetchModal {
        &mut self.fetch
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// "Add PKI manually".
    pub fn add_draft(&mut self) {
        self.drafts.push(Arc::new(Participant::default()));
        self.forms.push(ParticipantForm::new(&self.ids));
    }

    pub fn edit_name(&mut self, index: usize, value: &str) {
        let Some((form, draft)) = self.forms.get(index).zip(self.drafts.get(index)) else {
            return;
        };
        let event = form.edit_name(draft, value);
        self.apply(index, event);
    }

    pub fn edit_certificate(&mut self, index: usize, value: &str) {
        let Some((form, draft)) = self.forms.get(index).zip(self.drafts.get(index)) else {
            return;
        };
        let event = form.edit_certificate(draft, value);
        self.apply(index, event);
    }

    pub fn remove(&mut self, index: usize) {
        let Some(form) = self.forms.get(index) else {
            return;
        };
        let event = form.remove();
        self.apply(index, event);
    }

    fn apply(&mut self, index: usize, event: ParticipantFormEvent) {
        match event {
            ParticipantFormEvent::Changed(participant) => {
                self.drafts = replace_at(&self.drafts, index, participant);
            }
            ParticipantFormEvent::Removed => {
                if index < self.drafts.len() {
                    self.drafts.remove(index);
                    self.forms.remove(index);
                    self.fetch.draft_removed(index);
                }
            }
        }
    }

    pub fn can_save(&self) -> bool {
        !self.saving && can_create(self.drafts.iter().map(Arc::as_ref))
    }

    /// Submits the drafts. Returns the route to navigate to after the
    /// contract has been created.
    pub async fn save(&mut self, api: &dyn ContractsApi) -> Option<AppRoute> {
        if !self.can_save() {
            return None;
        }
        let request = match CreateContract::from_participants(self.drafts.iter().map(Arc::as_ref)) {
            Ok(request) => request,
            Err(error) => {
                self.last_error = Some(error.to_string());
                return None;
            }
        };

        self.saving = true;
        let result = api.create(request).await;
        self.saving = false;

        match result {
            Ok(contract) => {
                tracing::info!(contract_id = %contract.id, "contract created");
                Some(AppRoute::Home)
            }
            Err(error) => {
                tracing::warn!(error = %error, "creating contract failed");
                self.last_error = Some(error.to_string());
                None
            }
        }
    }

    pub fn open_fetch(&mut self, index: usize) {
        if index < self.drafts.len() {
            self.fetch.open(index);
        }
    }

    pub async fn fetch_certificate(&mut self, factory: &dyn PkiClientFactory) {
        if let Some(closed) = self.fetch.fetch(factory).await {
            self.on_fetch_close(closed);
        }
    }

    /// Writes a fetched certificate into the draft the modal was opened for.
    pub fn on_fetch_close(&mut self, closed: FetchClosed) {
        if let (Some(index), Some(certificate)) = (closed.target, closed.certificate) {
            self.edit_certificate(index, &certificate);
        }
    }

    pub fn render(&self) -> Markup {
        html! {
            section class="cr-view cr-create" {
                (back_link(None))
                div class="cr-view-header" {
                    h1 { "New Contract" }
                }
                (error_banner(self.last_error.as_deref()))
                div class="cr-participant-forms" {
                    @for (index, (form, draft)) in self.forms.iter().zip(&self.drafts).enumerate() {
                        (form.render(index, draft))
                    }
                }
                div class="cr-form-actions" {
                    button type="button" class="cr-btn subtle" data-action="add-participant" { "Add PKI manually" }
                    button type="button" class="cr-btn primary" data-action="save-contract" disabled[!self.can_save()] { "Save" }
                }
                (self.fetch.render())
            }
        }
    }
}

/// New list with the entry at `index` replaced; every other entry is shared.
fn replace_at(
    drafts: &[Arc<Participant>],
    index: usize,
    participant: Participant,
) -> Vec<Arc<Participant>> {
    let replacement = Arc::new(participant);
    drafts
        .iter()
        .enumerate()
        .map(|(position, draft)| {
            if position == index {
                Arc::clone(&replacement)
            } else {
                Arc::clone(draft)
            }
        })
        .collect()
}
