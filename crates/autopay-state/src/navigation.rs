//! Named views and path-like routes

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Dashboard,
    Agents,
    Simulate,
    PaymentLogs,
    Settings,
    /// Fallback for any path that names no view
    NotFound(String),
}

impl Route {
    /// Views reachable from the tab bar, in order
    pub const TABS: [Route; 5] = [
        Route::Dashboard,
        Route::Agents,
        Route::Simulate,
        Route::PaymentLogs,
        Route::Settings,
    ];

    /// Map a path onto a view; unknown paths become `NotFound`
    pub fn resolve(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        match normalized {
            "/" => Self::Dashboard,
            "/agents" => Self::Agents,
            "/simulate" => Self::Simulate,
            "/logs" => Self::PaymentLogs,
            "/settings" => Self::Settings,
            _ => {
                tracing::warn!(path = %trimmed, "404: attempted to access non-existent route");
                Self::NotFound(trimmed.to_string())
            }
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Dashboard => "/",
            Self::Agents => "/agents",
            Self::Simulate => "/simulate",
            Self::PaymentLogs => "/logs",
            Self::Settings => "/settings",
            Self::NotFound(path) => path,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Agents => "Agents",
            Self::Simulate => "Simulate",
            Self::PaymentLogs => "Payment Logs",
            Self::Settings => "Settings",
            Self::NotFound(_) => "Not Found",
        }
    }

    /// Position in [`Route::TABS`], `None` for the fallback view
    pub fn tab_index(&self) -> Option<usize> {
        Self::TABS.iter().position(|r| r == self)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Something that can switch the visible view
pub trait Navigator {
    fn navigate(&mut self, route: Route);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_routes_round_trip() {
        for route in Route::TABS {
            assert_eq!(Route::resolve(route.path()), route);
        }
    }

    #[test]
    fn test_trailing_slash_and_empty_path() {
        assert_eq!(Route::resolve("/agents/"), Route::Agents);
        assert_eq!(Route::resolve(""), Route::Dashboard);
    }

    #[test]
    fn test_unknown_route_falls_back() {
        let route = Route::resolve("/wallets");
        assert_eq!(route, Route::NotFound("/wallets".to_string()));
        assert_eq!(route.title(), "Not Found");
        assert_eq!(route.tab_index(), None);
    }
}
