use contracts_client::PkiClientFactory;
use maud::{Markup, html};

use crate::ids::ElementIds;
use crate::widgets::{FormInput, Modal, ModalClick, error_banner};

/// Close event of the fetch modal. `certificate` is `None` when the user
/// dismissed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchClosed {
    pub target: Option<usize>,
    pub certificate: Option<String>,
}

/// Fetches the CA certificate of a PKI host for one draft participant.
#[derive(Debug, Clone)]
pub struct CertificateFetchModal {
    show: bool,
    target: Option<usize>,
    host: String,
    token: String,
    host_input: FormInput,
    token_input: FormInput,
    last_error: Option<String>,
}

impl CertificateFetchModal {
    pub fn new(ids: &ElementIds) -> Self {
        Self {
            show: false,
            target: None,
            host: String::new(),
            token: String::new(),
            host_input: FormInput::new(ids, "PKI Host").with_placeholder("https://pki.example.com"),
            token_input: FormInput::new(ids, "Bearer Token (optional)").with_type("password"),
            last_error: None,
        }
    }

    pub fn is_shown(&self) -> bool {
        self.show
    }

    pub fn target(&self) -> Option<usize> {
        self.target
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn open(&mut self, target: usize) {
        self.show = true;
        self.target = Some(target);
        self.last_error = None;
    }

    pub fn set_host(&mut self, value: &str) {
        self.host = self.host_input.input(value).0;
    }

    pub fn set_token(&mut self, value: &str) {
        self.token = self.token_input.input(value).0;
    }

    /// Calls the PKI host. On failure the error stays inline and the modal
    /// remains open for another attempt.
    pub async fn fetch(&mut self, factory: &dyn PkiClientFactory) -> Option<FetchClosed> {
        let token = Some(self.token.as_str()).filter(|token| !token.is_empty());
        let result = match factory.pki_client(&self.host) {
            Ok(client) => client.get_ca(token).await,
            Err(error) => Err(error),
        };

        match result {
            Ok(certificate) => {
                tracing::info!(host = %self.host, "fetched pki certificate");
                let certificate = String::from_utf8_lossy(&certificate).into_owned();
                Some(self.close(Some(certificate)))
            }
            Err(error) => {
                tracing::warn!(host = %self.host, error = %error, "fetching pki certificate failed");
                self.last_error = Some(error.to_string());
                None
            }
        }
    }

    /// Follows the targeted draft after the draft at `removed` is deleted.
    /// Dismisses the modal when its own draft is the one removed.
    pub fn draft_removed(&mut self, removed: usize) {
        match self.target {
            Some(target) if target == removed => {
                self.dismiss();
            }
            Some(target) if target > removed => self.target = Some(target - 1),
            _ => {}
        }
    }

    pub fn dismiss(&mut self) -> FetchClosed {
        self.close(None)
    }

    pub fn click(&mut self, target: ModalClick) -> Option<FetchClosed> {
        Modal::new(self.show)
            .click(target)
            .map(|_| self.dismiss())
    }

    fn close(&mut self, certificate: Option<String>) -> FetchClosed {
        self.show = false;
        self.last_error = None;
        FetchClosed {
            target: self.target.take(),
            certificate,
        }
    }

    pub fn render(&self) -> Markup {
        let body = html! {
            h3 class="cr-modal-title" { "Fetch certificate from PKI" }
            (error_banner(self.last_error.as_deref()))
            (self.host_input.render("pki_host", &self.host))
            (self.token_input.render("pki_token", &self.token))
            div class="cr-modal-actions" {
                button type="button" class="cr-btn subtle" data-action="fetch-cancel" { "Cancel" }
                button type="button" class="cr-btn primary" data-action="fetch-submit" { "Fetch" }
            }
        };
        Modal::new(self.show).render(&body)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use contracts_client::{Code, PkiApi, RpcError};

    use super::*;

    #[derive(Debug, Default)]
    struct Recorded {
        hosts: Vec<String>,
        tokens: Vec<Option<String>>,
    }

    struct FakePki {
        recorded: Arc<Mutex<Recorded>>,
        result: Result<Vec<u8>, RpcError>,
    }

    #[async_trait]
    impl PkiApi for FakePki {
        async fn get_ca(&self, bearer_token: Option<&str>) -> Result<Vec<u8>, RpcError> {
            if let Ok(mut recorded) = self.recorded.lock() {
                recorded.tokens.push(bearer_token.map(str::to_string));
            }
            self.result.clone()
        }
    }

    struct FakeFactory {
        recorded: Arc<Mutex<Recorded>>,
        result: Result<Vec<u8>, RpcError>,
    }

    impl FakeFactory {
        fn new(result: Result<Vec<u8>, RpcError>) -> Self {
            Self {
                recorded: Arc::default(),
                result,
            }
        }

        fn recorded(&self) -> (Vec<String>, Vec<Option<String>>) {
            let recorded = self.recorded.lock().expect("recorded lock");
            (recorded.hosts.clone(), recorded.tokens.clone())
        }
    }

    impl PkiClientFactory for FakeFactory {
        fn pki_client(&self, host: &str) -> Result<Box<dyn PkiApi>, RpcError> {
            self.recorded
                .lock()
                .expect("recorded lock")
                .hosts
                .push(host.to_string());
            Ok(Box::new(FakePki {
                recorded: Arc::clone(&self.recorded),
                result: self.result.clone(),
            }))
        }
    }

    #[tokio::test]
    async fn fetch_without_token_decodes_certificate() {
        let factory = FakeFactory::new(Ok(b"-----BEGIN CERTIFICATE-----".to_vec()));
        let mut modal = CertificateFetchModal::new(&ElementIds::new());
        modal.open(1);
        modal.set_host("http://example.com");

        let closed = modal.fetch(&factory).await;

        assert_eq!(
            closed,
            Some(FetchClosed {
                target: Some(1),
                certificate: Some("-----BEGIN CERTIFICATE-----".to_string()),
            })
        );
        let (hosts, tokens) = factory.recorded();
        assert_eq!(hosts, vec!["http://example.com".to_string()]);
        assert_eq!(tokens, vec![None]);
        assert!(!modal.is_shown());
    }

    #[tokio::test]
    async fn fetch_passes_bearer_token() {
        let factory = FakeFactory::new(Ok(Vec::new()));
        let mut modal = CertificateFetchModal::new(&ElementIds::new());
        modal.open(0);
        modal.set_host("pki.example.com");
        modal.set_token("secret");

        modal.fetch(&factory).await;

        let (_, tokens) = factory.recorded();
        assert_eq!(tokens, vec![Some("secret".to_string())]);
    }

    #[tokio::test]
    async fn failure_stays_open_with_status() {
        let factory = FakeFactory::new(Err(RpcError::status(
            Code::PermissionDenied,
            "token rejected",
        )));
        let mut modal = CertificateFetchModal::new(&ElementIds::new());
        modal.open(0);
        modal.set_host("http://example.com");

        assert_eq!(modal.fetch(&factory).await, None);
        assert!(modal.is_shown());
        assert_eq!(modal.target(), Some(0));
        let html = modal.render().into_string();
        assert!(html.contains("PermissionDenied"));
        assert!(html.contains("token rejected"));
    }

    #[test]
    fn dismissing_emits_no_payload() {
        let mut modal = CertificateFetchModal::new(&ElementIds::new());
        modal.open(2);
        assert_eq!(modal.click(ModalClick::Body), None);
        assert_eq!(
            modal.click(ModalClick::Backdrop),
            Some(FetchClosed {
                target: Some(2),
                certificate: None,
            })
        );
        assert!(!modal.is_shown());
    }
}
