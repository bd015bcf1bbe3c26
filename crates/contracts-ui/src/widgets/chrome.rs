use maud::{Markup, html};

use crate::router::{AppRoute, RouteName, url_for};

pub const BRAND: &str = "WirePact Contract Repository";

/// Top navigation with the brand and the two top-level routes.
pub fn header(current: &AppRoute) -> Markup {
    let home = url_for(RouteName::Home, None).unwrap_or_default();
    let new = url_for(RouteName::New, None).unwrap_or_default();
    let nav = [
        (RouteName::Home, home.as_str(), "Overview"),
        (RouteName::New, new.as_str(), "New Contract"),
    ];

    html! {
        header class="cr-topbar" {
            a class="cr-brand" href=(home) { (BRAND) }
            nav class="cr-nav" {
                @for (name, href, label) in nav {
                    @let active = current.name() == Some(name);
                    a class={(if active { "cr-nav-link active" } else { "cr-nav-link" })} href=(href) { (label) }
                }
            }
        }
    }
}

/// Link back to `href`, or to the home route when `None`.
pub fn back_link(href: Option<&str>) -> Markup {
    let target = href
        .map(str::to_string)
        .or_else(|| url_for(RouteName::Home, None))
        .unwrap_or_default();
    html! {
        a class="cr-back" href=(target) { "← back" }
    }
}

pub fn spinner() -> Markup {
    html! {
        div class="cr-spinner" role="status" aria-live="polite" {
            span class="cr-spinner-dot" {}
            span class="cr-muted" { "Loading..." }
        }
    }
}

/// Inline failure banner shared by every view.
pub fn error_banner(error: Option<&str>) -> Markup {
    html! {
        @if let Some(error) = error {
            div class="cr-notice error" role="alert" { (error) }
        }
    }
}
