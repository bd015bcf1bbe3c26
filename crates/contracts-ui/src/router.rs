/// Names used for reverse lookups when building links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Home,
    New,
    Detail,
}

impl RouteName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::New => "new",
            Self::Detail => "detail",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "home" => Some(Self::Home),
            "new" => Some(Self::New),
            "detail" => Some(Self::Detail),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRoute {
    Home,
    New,
    Detail { contract_id: String },
    NotFound { path: String },
}

impl AppRoute {
    pub fn from_path(path: &str) -> Self {
        let path_only = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path_only.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };

        match normalized {
            "" | "/" => Self::Home,
            "/new" => Self::New,
            _ => match normalized.strip_prefix("/detail/") {
                Some(contract_id) if !contract_id.is_empty() && !contract_id.contains('/') => {
                    Self::Detail {
                        contract_id: contract_id.to_string(),
                    }
                }
                _ => Self::NotFound {
                    path: normalized.to_string(),
                },
            },
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::New => "/new".to_string(),
            Self::Detail { contract_id } => format!("/detail/{contract_id}"),
            Self::NotFound { path } => path.clone(),
        }
    }

    pub fn name(&self) -> Option<RouteName> {
        match self {
            Self::Home => Some(RouteName::Home),
            Self::New => Some(RouteName::New),
            Self::Detail { .. } => Some(RouteName::Detail),
            Self::NotFound { .. } => None,
        }
    }

    pub fn detail(contract_id: impl Into<String>) -> Self {
        Self::Detail {
            contract_id: contract_id.into(),
        }
    }
}

/// Reverse lookup: URL of the named route. `detail` needs a contract id.
pub fn url_for(name: RouteName, contract_id: Option<&str>) -> Option<String> {
    match name {
        RouteName::Home => Some(AppRoute::Home.to_path()),
        RouteName::New => Some(AppRoute::New.to_path()),
        RouteName::Detail => contract_id
            .filter(|id| !id.is_empty())
            .map(|id| AppRoute::detail(id).to_path()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_resolve_to_routes() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path(""), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/new/"), AppRoute::New);
        assert_eq!(AppRoute::from_path("/new?drafts=3"), AppRoute::New);
        assert_eq!(AppRoute::from_path("/detail/abc123"), AppRoute::detail("abc123"));
        assert_eq!(
            AppRoute::from_path("/detail/"),
            AppRoute::NotFound {
                path: "/detail".to_string()
            }
        );
        assert_eq!(
            AppRoute::from_path("/detail/a/b"),
            AppRoute::NotFound {
                path: "/detail/a/b".to_string()
            }
        );
    }

    #[test]
    fn to_path_round_trips_known_routes() {
        for route in [AppRoute::Home, AppRoute::New, AppRoute::detail("f00d")] {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn reverse_lookup_by_name() {
        assert_eq!(url_for(RouteName::Home, None), Some("/".to_string()));
        assert_eq!(url_for(RouteName::New, None), Some("/new".to_string()));
        assert_eq!(
            url_for(RouteName::Detail, Some("abc")),
            Some("/detail/abc".to_string())
        );
        assert_eq!(url_for(RouteName::Detail, None), None);
        assert_eq!(RouteName::from_name("detail"), Some(RouteName::Detail));
        assert_eq!(RouteName::Home.as_str(), "home");
        assert_eq!(AppRoute::detail("x").name(), Some(RouteName::Detail));
    }
}
