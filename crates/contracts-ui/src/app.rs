use std::sync::Arc;

use contracts_client::{ContractsApi, PkiClientFactory};
use maud::{Markup, html};

use crate::ids::ElementIds;
use crate::router::AppRoute;
use crate::views::{CreateView, DetailView, ListView};
use crate::widgets::{ConfirmClosed, ModalClick, header};

/// The mounted top-level view.
#[derive(Debug, Clone)]
pub enum Page {
    List(ListView),
    Detail(DetailView),
    Create(CreateView),
    NotFound { path: String },
}

/// User interactions routed to the mounted page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Navigate { path: String },
    AddDraft,
    EditDraftName { index: usize, value: String },
    EditDraftCertificate { index: usize, value: String },
    RemoveDraft { index: usize },
    Save,
    OpenFetch { index: usize },
    FetchHostChanged { value: String },
    FetchTokenChanged { value: String },
    FetchCertificate,
    FetchModalClick { target: ModalClick },
    RequestDelete,
    CloseDeleteDialog { confirmed: bool },
}

/// Root of the component tree: header plus the page for the current route.
pub struct App {
    contracts: Arc<dyn ContractsApi>,
    pki: Arc<dyn PkiClientFactory>,
    ids: ElementIds,
    route: AppRoute,
    page: Page,
}

impl App {
    /// Mounts the app on the list route without fetching; call
    /// [`App::navigate`] to load a page.
    pub fn new(contracts: Arc<dyn ContractsApi>, pki: Arc<dyn PkiClientFactory>) -> Self {
        Self {
            contracts,
            pki,
            ids: ElementIds::new(),
            route: AppRoute::Home,
            page: Page::List(ListView::new()),
        }
    }

    pub fn route(&self) -> &AppRoute {
        &self.route
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Resolves `path`, mounts a fresh page and runs its fetches.
    pub async fn navigate(&mut self, path: &str) {
        self.go(AppRoute::from_path(path)).await;
    }

    pub async fn go(&mut self, route: AppRoute) {
        tracing::info!(path = %route.to_path(), "navigating");
        let contracts = Arc::clone(&self.contracts);
        self.page = match &route {
            AppRoute::Home => {
                let mut view = ListView::new();
                view.activate(contracts.as_ref()).await;
                Page::List(view)
            }
            AppRoute::Detail { contract_id } => {
                let mut view = DetailView::new(contract_id.clone());
                view.activate(contracts.as_ref()).await;
                Page::Detail(view)
            }
            AppRoute::New => Page::Create(CreateView::new(self.ids.clone())),
            AppRoute::NotFound { path } => Page::NotFound { path: path.clone() },
        };
        self.route = route;
    }

    /// Applies `action` to the mounted page. Returns `false` when the action
    /// does not belong to it.
    pub async fn dispatch(&mut self, action: AppAction) -> bool {
        let contracts = Arc::clone(&self.contracts);
        let pki = Arc::clone(&self.pki);

        let navigation = match (&mut self.page, action) {
            (_, AppAction::Navigate { path }) => Some(AppRoute::from_path(&path)),
            (Page::Create(view), AppAction::AddDraft) => {
                view.add_draft();
                None
            }
            (Page::Create(view), AppAction::EditDraftName { index, value }) => {
                view.edit_name(index, &value);
                None
            }
            (Page::Create(view), AppAction::EditDraftCertificate { index, value }) => {
                view.edit_certificate(index, &value);
                None
            }
            (Page::Create(view), AppAction::RemoveDraft { index }) => {
                view.remove(index);
                None
            }
            (Page::Create(view), AppAction::Save) => view.save(contracts.as_ref()).await,
            (Page::Create(view), AppAction::OpenFetch { index }) => {
                view.open_fetch(index);
                None
            }
            (Page::Create(view), AppAction::FetchHostChanged { value }) => {
                view.fetch_modal_mut().set_host(&value);
                None
            }
            (Page::Create(view), AppAction::FetchTokenChanged { value }) => {
                view.fetch_modal_mut().set_token(&value);
                None
            }
            (Page::Create(view), AppAction::FetchCertificate) => {
                view.fetch_certificate(pki.as_ref()).await;
                None
            }
            (Page::Create(view), AppAction::FetchModalClick { target }) => {
                if let Some(closed) = view.fetch_modal_mut().click(target) {
                    view.on_fetch_close(closed);
                }
                None
            }
            (Page::Detail(view), AppAction::RequestDelete) => {
                view.request_delete();
                None
            }
            (Page::Detail(view), AppAction::CloseDeleteDialog { confirmed }) => {
                view.on_dialog_close(ConfirmClosed(confirmed), contracts.as_ref())
                    .await
            }
            (_, action) => {
                tracing::debug!(?action, route = %self.route.to_path(), "action ignored for current page");
                return false;
            }
        };

        if let Some(route) = navigation {
            self.go(route).await;
        }
        true
    }

    pub fn render(&self) -> Markup {
        html! {
            div id="root-app" class="cr-app" {
                (header(&self.route))
                main class="cr-main" {
                    @match &self.page {
                        Page::List(view) => (view.render()),
                        Page::Detail(view) => (view.render()),
                        Page::Create(view) => (view.render()),
                        Page::NotFound { path } => {
                            section class="cr-view" {
                                h1 { "Not found" }
                                p class="cr-muted" { "Nothing lives at " code { (path) } "." }
                            }
                        }
                    }
                }
            }
        }
    }
}
