//! Route guard for protected views
//!
//! Views such as the dashboard or the chat are only for signed-in visitors.
//! A signed-out visitor is sent to the sign-in view and the guard remembers
//! where they were headed, so [`RouteGuard::after_sign_in`] can send them
//! back there.

use crate::session::SessionState;
use std::fmt;
use std::str::FromStr;

use crate::error::DhraviqError;

/// A view of the application
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Auth,
    Dashboard,
    /// A fresh conversation
    Chat,
    /// A conversation opened by session id
    ChatSession(String),
    Profile,
    Settings,
    Learn,
    Contact,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Auth => "/auth".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Chat => "/chat".to_string(),
            Self::ChatSession(id) => format!("/chat/{}", id),
            Self::Profile => "/profile".to_string(),
            Self::Settings => "/settings".to_string(),
            Self::Learn => "/learn".to_string(),
            Self::Contact => "/contact".to_string(),
        }
    }

    /// Whether the view requires a signed-in identity
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Self::Dashboard | Self::Chat | Self::ChatSession(_) | Self::Profile | Self::Settings
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl FromStr for Route {
    type Err = DhraviqError;

    /// Parse a path such as `/chat/abc123`
    ///
    /// A trailing slash is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use dhraviq::guard::Route;
    ///
    /// let route: Route = "/chat/s-42".parse().unwrap();
    /// assert_eq!(route, Route::ChatSession("s-42".to_string()));
    /// assert!("/nowhere".parse::<Route>().is_err());
    /// ```
    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim();
        let trimmed = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };

        let route = match trimmed {
            "/" | "" => Self::Home,
            "/auth" => Self::Auth,
            "/dashboard" => Self::Dashboard,
            "/chat" => Self::Chat,
            "/profile" => Self::Profile,
            "/settings" => Self::Settings,
            "/learn" => Self::Learn,
            "/contact" => Self::Contact,
            other => match other.strip_prefix("/chat/") {
                Some(id) if !id.is_empty() && !id.contains('/') => {
                    Self::ChatSession(id.to_string())
                }
                _ => {
                    return Err(DhraviqError::Config(format!("Unknown route: {}", path)));
                }
            },
        };
        Ok(route)
    }
}

/// What to do with a visit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// The session is still resolving; show a waiting indicator
    Loading,
    Allow,
    /// Send the visitor to `to`; `return_to` is where they were going
    Redirect { to: Route, return_to: Route },
}

/// Decides whether a route may be shown and remembers redirect targets
#[derive(Debug, Default)]
pub struct RouteGuard {
    remembered: Option<Route>,
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide a visit to `route` given the current session state
    ///
    /// # Examples
    ///
    /// ```
    /// use dhraviq::guard::{GuardDecision, Route, RouteGuard};
    /// use dhraviq::session::SessionState;
    ///
    /// let mut guard = RouteGuard::new();
    /// let signed_out = SessionState { identity: None, loading: false };
    ///
    /// assert_eq!(guard.check(&Route::Learn, &signed_out), GuardDecision::Allow);
    /// assert_eq!(
    ///     guard.check(&Route::Profile, &signed_out),
    ///     GuardDecision::Redirect { to: Route::Auth, return_to: Route::Profile }
    /// );
    /// assert_eq!(guard.after_sign_in(), Route::Profile);
    /// ```
    pub fn check(&mut self, route: &Route, session: &SessionState) -> GuardDecision {
        if !route.is_protected() {
            return GuardDecision::Allow;
        }
        if session.loading {
            return GuardDecision::Loading;
        }
        if session.is_authenticated() {
            return GuardDecision::Allow;
        }

        tracing::debug!(route = %route, "Redirecting signed-out visitor to sign-in");
        self.remembered = Some(route.clone());
        GuardDecision::Redirect {
            to: Route::Auth,
            return_to: route.clone(),
        }
    }

    /// Route remembered by the last redirect, if any
    pub fn remembered(&self) -> Option<&Route> {
        self.remembered.as_ref()
    }

    /// Where to go once sign-in succeeds
    ///
    /// Consumes the remembered route; falls back to the dashboard.
    pub fn after_sign_in(&mut self) -> Route {
        self.remembered.take().unwrap_or(Route::Dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Identity;

    fn signed_out() -> SessionState {
        SessionState {
            identity: None,
            loading: false,
        }
    }

    fn signed_in() -> SessionState {
        SessionState {
            identity: Some(Identity::new("u1", None, None)),
            loading: false,
        }
    }

    #[test]
    fn test_route_paths_roundtrip() {
        for path in [
            "/",
            "/auth",
            "/dashboard",
            "/chat",
            "/chat/abc",
            "/profile",
            "/settings",
            "/learn",
            "/contact",
        ] {
            let route: Route = path.parse().unwrap();
            assert_eq!(route.path(), path);
        }
        assert_eq!("/chat/".parse::<Route>().unwrap(), Route::Chat);
        assert!("/chat/a/b".parse::<Route>().is_err());
    }

    #[test]
    fn test_protected_routes() {
        assert!(Route::Dashboard.is_protected());
        assert!(Route::ChatSession("x".into()).is_protected());
        assert!(!Route::Home.is_protected());
        assert!(!Route::Auth.is_protected());
        assert!(!Route::Learn.is_protected());
    }

    #[test]
    fn test_loading_waits() {
        let mut guard = RouteGuard::new();
        let loading = SessionState {
            identity: None,
            loading: true,
        };
        assert_eq!(guard.check(&Route::Chat, &loading), GuardDecision::Loading);
        assert_eq!(guard.check(&Route::Contact, &loading), GuardDecision::Allow);
        assert!(guard.remembered().is_none());
    }

    #[test]
    fn test_redirect_and_return_after_sign_in() {
        let mut guard = RouteGuard::new();
        let target = Route::ChatSession("s-9".to_string());

        assert_eq!(
            guard.check(&target, &signed_out()),
            GuardDecision::Redirect {
                to: Route::Auth,
                return_to: target.clone()
            }
        );
        assert_eq!(guard.remembered(), Some(&target));

        let back = guard.after_sign_in();
        assert_eq!(back, target);
        assert_eq!(guard.check(&back, &signed_in()), GuardDecision::Allow);
        assert_eq!(guard.after_sign_in(), Route::Dashboard);
    }

    #[test]
    fn test_authenticated_visitor_allowed() {
        let mut guard = RouteGuard::new();
        assert_eq!(
            guard.check(&Route::Settings, &signed_in()),
            GuardDecision::Allow
        );
    }
}
