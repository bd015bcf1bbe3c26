use maud::{Markup, html};

use crate::ids::ElementIds;

/// New value typed into a form control. The parent stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueChanged(pub String);

/// Controlled single-line input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub id: String,
    pub label: String,
    pub input_type: String,
    pub placeholder: String,
}

impl FormInput {
    pub fn new(ids: &ElementIds, label: impl Into<String>) -> Self {
        Self {
            id: ids.next("input"),
            label: label.into(),
            input_type: "text".to_string(),
            placeholder: String::new(),
        }
    }

    pub fn with_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = input_type.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn input(&self, value: impl Into<String>) -> ValueChanged {
        ValueChanged(value.into())
    }

    /// `name` is the form field the value is submitted under.
    pub fn render(&self, name: &str, value: &str) -> Markup {
        html! {
            div class="cr-field" {
                @if !self.label.is_empty() {
                    label for=(self.id) { (self.label) }
                }
                input id=(self.id)
                    type=(self.input_type)
                    name=(name)
                    value=(value)
                    placeholder=(self.placeholder);
            }
        }
    }
}
