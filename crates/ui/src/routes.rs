use std::fmt;

use tutor_core::SessionState;

/// Named views of the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`, always redirects to the login view.
    Root,
    Login,
    Home,
    Exams,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Root, Route::Login, Route::Home, Route::Exams];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Login => "/login",
            Route::Home => "/home",
            Route::Exams => "/exams",
        }
    }

    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        Self::ALL.into_iter().find(|route| route.path() == normalized)
    }

    #[must_use]
    pub fn requires_auth(self) -> bool {
        matches!(self, Route::Home | Route::Exams)
    }

    /// Static redirect declared on the route itself.
    #[must_use]
    pub fn redirect(self) -> Option<Route> {
        match self {
            Route::Root => Some(Route::Login),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavDecision {
    Allow,
    Redirect(Route),
}

/// Decide whether a transition to `target` may proceed.
#[must_use]
pub fn guard(target: Route, session: &SessionState) -> NavDecision {
    let authenticated = session.is_authenticated();
    if target.requires_auth() && !authenticated {
        NavDecision::Redirect(Route::Login)
    } else if target == Route::Login && authenticated {
        NavDecision::Redirect(Route::Home)
    } else {
        NavDecision::Allow
    }
}

// Current rules settle in at most two hops.
const MAX_REDIRECTS: usize = 4;

/// Tracks the active route and applies redirects and the guard on every move.
#[derive(Clone, Debug)]
pub struct Navigator {
    current: Route,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            current: Route::Login,
        }
    }
}

impl Navigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Route {
        self.current
    }

    /// Resolve `target` against the session and make the result current.
    pub fn navigate(&mut self, target: Route, session: &SessionState) -> Route {
        let mut route = target;
        for _ in 0..MAX_REDIRECTS {
            let next = match route.redirect() {
                Some(redirect) => redirect,
                None => match guard(route, session) {
                    NavDecision::Allow => break,
                    NavDecision::Redirect(redirect) => redirect,
                },
            };
            route = next;
        }
        self.current = route;
        route
    }

    /// Re-check the current route, e.g. after login or logout.
    pub fn refresh(&mut self, session: &SessionState) -> Route {
        self.navigate(self.current, session)
    }
}
