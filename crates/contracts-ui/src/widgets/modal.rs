use maud::{Markup, html};

/// Where a click on an open modal landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalClick {
    Backdrop,
    Body,
}

/// Emitted when the backdrop of a shown modal is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dismissed;

/// Presentational modal shell. The parent owns `show` and decides what a
/// dismissal means.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modal {
    pub show: bool,
}

impl Modal {
    pub fn new(show: bool) -> Self {
        Self { show }
    }

    /// Body clicks stop at the body and never dismiss.
    pub fn click(&self, target: ModalClick) -> Option<Dismissed> {
        match (self.show, target) {
            (true, ModalClick::Backdrop) => Some(Dismissed),
            _ => None,
        }
    }

    pub fn render(&self, body: &Markup) -> Markup {
        let state = if self.show { "shown" } else { "hidden" };
        html! {
            div class={"cr-modal " (state)}
                aria-hidden=(if self.show { "false" } else { "true" })
                data-action="modal-backdrop" {
                div class="cr-modal-body" role="dialog" aria-modal="true" data-stop-propagation="click" {
                    (body)
                }
            }
        }
    }
}
