//! Component tree of the contract repository.
//!
//! Views own their state, talk to the backend through
//! [`contracts_client::ContractsApi`] and render deterministic HTML with
//! `maud`. User actions are plain method calls returning events or the route
//! to navigate to; [`App`] ties the pages to the router.

mod app;
pub mod ids;
pub mod router;
pub mod theme;
pub mod views;
pub mod widgets;

pub use app::{App, AppAction, Page};
pub use ids::ElementIds;
pub use router::{AppRoute, RouteName, url_for};
