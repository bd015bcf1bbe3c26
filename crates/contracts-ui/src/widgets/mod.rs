//! Reusable widgets shared by the views and the page host.

pub mod chrome;
pub mod confirm_modal;
pub mod form_input;
pub mod form_textarea;
pub mod modal;
pub mod participant_card;
pub mod participant_form;

pub use chrome::{back_link, error_banner, header, spinner};
pub use confirm_modal::{ConfirmClosed, ConfirmModal};
pub use form_input::{FormInput, ValueChanged};
pub use form_textarea::FormTextarea;
pub use modal::{Dismissed, Modal, ModalClick};
pub use participant_card::participant_card;
pub use participant_form::{ParticipantForm, ParticipantFormEvent};
