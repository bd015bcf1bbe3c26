use maud::{Markup, html};

use super::form_input::ValueChanged;
use crate::ids::ElementIds;

/// Controlled multi-line input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormTextarea {
    pub id: String,
    pub label: String,
    pub rows: u16,
    pub placeholder: String,
}

impl FormTextarea {
    pub const DEFAULT_ROWS: u16 = 5;

    pub fn new(ids: &ElementIds, label: impl Into<String>) -> Self {
        Self {
            id: ids.next("textarea"),
            label: label.into(),
            rows: Self::DEFAULT_ROWS,
            placeholder: String::new(),
        }
    }

    pub fn with_rows(mut self, rows: u16) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn input(&self, value: impl Into<String>) -> ValueChanged {
        ValueChanged(value.into())
    }

    pub fn render(&self, name: &str, value: &str) -> Markup {
        html! {
            div class="cr-field" {
                @if !self.label.is_empty() {
                    label for=(self.id) { (self.label) }
                }
                textarea id=(self.id)
                    name=(name)
                    rows=(self.rows)
                    placeholder=(self.placeholder) { (value) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textarea_defaults_to_five_rows() {
        let ids = ElementIds::new();
        let textarea = FormTextarea::new(&ids, "Public Certificate");
        let html = textarea.render("certificate", "PEM").into_string();
        assert!(html.contains("rows=\"5\""));
        assert!(html.contains(">PEM</textarea>"));
        assert_eq!(textarea.with_rows(8).rows, 8);
    }
}
