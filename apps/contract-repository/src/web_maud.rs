use contracts_proto::{Contract, Pki};
use contracts_ui::theme::styles;
use contracts_ui::views::contract_table;
use contracts_ui::widgets::{FormInput, FormTextarea, back_link, error_banner, header, participant_card};
use contracts_ui::{AppRoute, ElementIds, RouteName, url_for};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const BRAND_SUFFIX: &str = "WirePact Contract Repository";

/// Submit button name that asks for one more PKI slot.
pub const ADD_PKI_FIELD: &str = "add_pki";

#[derive(Debug, Clone)]
pub enum WebBody {
    ContractList {
        contracts: Vec<Contract>,
    },
    ContractDetail {
        contract: Contract,
    },
    NewContract {
        pkis: Vec<Pki>,
        status: Option<String>,
    },
    Error {
        heading: String,
        message: String,
    },
}

#[derive(Debug, Clone)]
pub struct WebPage {
    pub title: String,
    pub route: AppRoute,
    pub body: WebBody,
}

pub fn render_page(page: &WebPage) -> String {
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (page.title) " | " (BRAND_SUFFIX) }
                style { (PreEscaped(styles())) }
            }
            body {
                div id="root-app" class="cr-app" {
                    (header(&page.route))
                    main class="cr-main" id="cr-main-shell" {
                        (render_body(&page.body))
                    }
                }
            }
        }
    };

    markup.into_string()
}

fn render_body(body: &WebBody) -> Markup {
    match body {
        WebBody::ContractList { contracts } => list_body(contracts),
        WebBody::ContractDetail { contract } => detail_body(contract),
        WebBody::NewContract { pkis, status } => new_contract_body(pkis, status.as_deref()),
        WebBody::Error { heading, message } => html! {
            section class="cr-view cr-error" {
                (back_link(None))
                h1 { (heading) }
                (error_banner(Some(message)))
            }
        },
    }
}

fn list_body(contracts: &[Contract]) -> Markup {
    let new_url = url_for(RouteName::New, None).unwrap_or_default();
    html! {
        section class="cr-view cr-list" {
            div class="cr-view-header" {
                h1 { "Contracts" }
                a class="cr-btn primary" href=(new_url) { "New Contract" }
            }
            (contract_table(contracts))
        }
    }
}

fn detail_body(contract: &Contract) -> Markup {
    let detail_url = url_for(RouteName::Detail, Some(&contract.id)).unwrap_or_default();
    let delete_url = format!("{detail_url}/delete");
    html! {
        section class="cr-view cr-detail" {
            (back_link(None))
            div class="cr-view-header" {
                h1 { "Contract " code { (contract.id) } }
            }
            div class="cr-participants" {
                @for participant in &contract.participants {
                    (participant_card(participant))
                }
            }
            // Without scripts the confirmation step is a disclosure around the form.
            details class="cr-card cr-delete" {
                summary class="cr-btn danger" { "Delete" }
                p class="cr-modal-message" {
                    "Do you really want to delete the contract \"" (contract.id) "\"?"
                }
                form method="post" action=(delete_url) class="cr-modal-actions" {
                    button type="submit" class="cr-btn danger" { "Delete" }
                }
            }
        }
    }
}

fn new_contract_body(pkis: &[Pki], status: Option<&str>) -> Markup {
    let ids = ElementIds::new();
    let action = url_for(RouteName::New, None).unwrap_or_default();
    html! {
        section class="cr-view cr-create" {
            (back_link(None))
            div class="cr-view-header" {
                h1 { "New Contract" }
            }
            (error_banner(status))
            form method="post" action=(action) class="cr-create-form" {
                div class="cr-participant-forms" {
                    @for (index, pki) in pkis.iter().enumerate() {
                        @let name_input = FormInput::new(&ids, "PKI Name").with_placeholder("Cluster A");
                        @let certificate_input = FormTextarea::new(&ids, "Public Certificate")
                            .with_placeholder("--- BEGIN Certificate --- ...");
                        fieldset class="cr-card cr-participant-form" data-index=(index) {
                            (name_input.render(&format!("pkis[{index}].name"), &pki.name))
                            (certificate_input.render(
                                &format!("pkis[{index}].public_certificate"),
                                &pki.public_certificate
                            ))
                        }
                    }
                }
                // Save comes first so pressing enter in a field submits.
                div class="cr-form-actions" {
                    button type="submit" class="cr-btn primary" { "Save" }
                    button type="submit" class="cr-btn subtle" name=(ADD_PKI_FIELD) value="1" {
                        "Add PKI manually"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use contracts_proto::{Contract, Participant, Pki};
    use contracts_ui::AppRoute;

    use super::{WebBody, WebPage, render_page};

    fn contract(id: &str) -> Contract {
        Contract {
            id: id.to_string(),
            participants: vec![Participant {
                name: "Cluster A".to_string(),
                public_key: b"-----BEGIN CERTIFICATE-----".to_vec(),
                hash: "abc123".to_string(),
            }],
        }
    }

    #[test]
    fn list_page_renders_shell_and_rows() {
        let page = WebPage {
            title: "Contracts".to_string(),
            route: AppRoute::Home,
            body: WebBody::ContractList {
                contracts: vec![contract("c1"), contract("c2")],
            },
        };

        let html = render_page(&page);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Contracts | WirePact Contract Repository</title>"));
        assert!(html.contains("id=\"root-app\""));
        assert!(html.contains("href=\"/detail/c1\""));
        assert!(html.contains("cr-row odd"));
    }

    #[test]
    fn detail_page_posts_delete_for_the_contract() {
        let page = WebPage {
            title: "Contract".to_string(),
            route: AppRoute::detail("c1"),
            body: WebBody::ContractDetail {
                contract: contract("c1"),
            },
        };

        let html = render_page(&page);
        assert!(html.contains("action=\"/detail/c1/delete\""));
        assert!(html.contains("Do you really want to delete the contract"));
        assert!(html.contains("Certificate Digest (SHA-256 Hash)"));
    }

    #[test]
    fn new_contract_form_uses_indexed_field_names() {
        let page = WebPage {
            title: "New Contract".to_string(),
            route: AppRoute::New,
            body: WebBody::NewContract {
                pkis: vec![
                    Pki {
                        name: "Cluster A".to_string(),
                        public_certificate: "pem".to_string(),
                    },
                    Pki::default(),
                ],
                status: Some("a contract needs at least 2 participants, got 1".to_string()),
            },
        };

        let html = render_page(&page);
        assert!(html.contains("name=\"pkis[0].name\""));
        assert!(html.contains("name=\"pkis[1].public_certificate\""));
        assert!(html.contains("value=\"Cluster A\""));
        assert!(html.contains("name=\"add_pki\""));
        assert!(html.contains("action=\"/new\""));
        assert!(html.contains("cr-notice error"));
    }
}
