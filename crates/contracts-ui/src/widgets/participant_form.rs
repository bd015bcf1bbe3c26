use contracts_proto::Participant;
use maud::{Markup, html};

use super::form_input::FormInput;
use super::form_textarea::FormTextarea;
use crate::ids::ElementIds;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantFormEvent {
    /// The previous participant with the edited field merged in.
    Changed(Participant),
    Removed,
}

/// Editor for one draft participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantForm {
    name_input: FormInput,
    certificate_input: FormTextarea,
}

impl ParticipantForm {
    pub fn new(ids: &ElementIds) -> Self {
        Self {
            name_input: FormInput::new(ids, "PKI Name").with_placeholder("Cluster A"),
            certificate_input: FormTextarea::new(ids, "Public Certificate")
                .with_placeholder("--- BEGIN Certificate --- ..."),
        }
    }

    pub fn edit_name(&self, previous: &Participant, value: &str) -> ParticipantFormEvent {
        let changed = self.name_input.input(value);
        ParticipantFormEvent::Changed(previous.with_name(changed.0))
    }

    pub fn edit_certificate(&self, previous: &Participant, value: &str) -> ParticipantFormEvent {
        let changed = self.certificate_input.input(value);
        ParticipantFormEvent::Changed(previous.with_certificate_text(&changed.0))
    }

    pub fn remove(&self) -> ParticipantFormEvent {
        ParticipantFormEvent::Removed
    }

    /// Renders the editor; `index` is the draft position used in field names.
    pub fn render(&self, index: usize, participant: &Participant) -> Markup {
        html! {
            fieldset class="cr-card cr-participant-form" data-index=(index) {
                (self.name_input.render(&format!("pkis[{index}].name"), &participant.name))
                (self.certificate_input.render(
                    &format!("pkis[{index}].public_certificate"),
                    &participant.certificate_text()
                ))
                div class="cr-form-actions" {
                    button type="button" class="cr-btn subtle" data-action="fetch-certificate" data-index=(index) {
                        "Fetch from PKI"
                    }
                    button type="button" class="cr-btn danger" data-action="remove-participant" data-index=(index) {
                        "Remove"
                    }
                }
            }
        }
    }
}
