use maud::{Markup, html};

use super::modal::{Modal, ModalClick};

/// Outcome emitted when the dialog closes: `true` only for the action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmClosed(pub bool);

/// Confirmation dialog that reports the user's decision and performs nothing
/// itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmModal {
    pub show: bool,
    pub destructive: bool,
    pub title: String,
    pub message: String,
}

impl ConfirmModal {
    pub fn new(title: impl Into<String>, destructive: bool) -> Self {
        Self {
            show: false,
            destructive,
            title: title.into(),
            message: String::new(),
        }
    }

    pub fn open(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.show = true;
    }

    pub fn confirm(&self) -> ConfirmClosed {
        ConfirmClosed(true)
    }

    pub fn cancel(&self) -> ConfirmClosed {
        ConfirmClosed(false)
    }

    pub fn click(&self, target: ModalClick) -> Option<ConfirmClosed> {
        Modal::new(self.show).click(target).map(|_| self.cancel())
    }

    pub fn action_label(&self) -> &'static str {
        if self.destructive { "Delete" } else { "Confirm" }
    }

    fn action_class(&self) -> &'static str {
        if self.destructive {
            "cr-btn danger"
        } else {
            "cr-btn primary"
        }
    }

    pub fn render(&self) -> Markup {
        let body = html! {
            h3 class="cr-modal-title" { (self.title) }
            p class="cr-modal-message" { (self.message) }
            div class="cr-modal-actions" {
                button type="button" class="cr-btn subtle" data-action="confirm-cancel" { "Cancel" }
                button type="button" class=(self.action_class()) data-action="confirm-accept" {
                    (self.action_label())
                }
            }
        };
        Modal::new(self.show).render(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destructive_flag_switches_label_and_color() {
        let mut destructive = ConfirmModal::new("Delete contract", true);
        destructive.open("Delete contract abc?");
        let html = destructive.render().into_string();
        assert!(html.contains("cr-btn danger"));
        assert!(html.contains(">Delete<"));
        assert!(html.contains("Delete contract abc?"));

        let neutral = ConfirmModal::new("Proceed", false).render().into_string();
        assert!(neutral.contains("cr-btn primary"));
        assert!(neutral.contains(">Confirm<"));
        assert!(neutral.contains(">Cancel<"));
    }

    #[test]
    fn outcomes_are_boolean() {
        let mut modal = ConfirmModal::new("Delete", true);
        modal.open("sure?");
        assert_eq!(modal.confirm(), ConfirmClosed(true));
        assert_eq!(modal.cancel(), ConfirmClosed(false));
        assert_eq!(modal.click(ModalClick::Backdrop), Some(ConfirmClosed(false)));
        assert_eq!(modal.click(ModalClick::Body), None);
    }
}
