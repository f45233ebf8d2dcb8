use std::sync::Arc;

use services::{AppServices, ReplyOutcome, TutorError, TutorLoopService};
use tutor_core::{SessionState, SessionStateError};

use crate::routes::{Navigator, Route};
use crate::vm::{ChatVm, QuestionVm, map_chat, map_question};

/// What the view layer needs from the composition root.
pub trait UiApp: Send + Sync {
    fn new_session(&self) -> SessionState;
    fn tutor_loop(&self) -> Arc<TutorLoopService>;
    fn ai_enabled(&self) -> bool;
}

impl UiApp for AppServices {
    fn new_session(&self) -> SessionState {
        AppServices::new_session(self)
    }

    fn tutor_loop(&self) -> Arc<TutorLoopService> {
        AppServices::tutor_loop(self)
    }

    fn ai_enabled(&self) -> bool {
        self.tutor().enabled()
    }
}

/// The one session a front-end drives, plus routing and the tutor loop.
///
/// Every auth change re-runs the navigation guard so the active route never
/// points at a view the session may not see.
pub struct AppContext {
    session: SessionState,
    navigator: Navigator,
    tutor_loop: Arc<TutorLoopService>,
    ai_enabled: bool,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &dyn UiApp) -> Self {
        let session = app.new_session();
        let mut navigator = Navigator::new();
        navigator.navigate(Route::Root, &session);
        Self {
            session,
            navigator,
            tutor_loop: app.tutor_loop(),
            ai_enabled: app.ai_enabled(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    #[must_use]
    pub fn route(&self) -> Route {
        self.navigator.current()
    }

    #[must_use]
    pub fn ai_enabled(&self) -> bool {
        self.ai_enabled
    }

    /// Go to `target`, subject to redirects and the guard.
    pub fn navigate(&mut self, target: Route) -> Route {
        self.navigator.navigate(target, &self.session)
    }

    pub fn login(&mut self, email: &str) -> Route {
        self.session.login(email);
        self.navigator.refresh(&self.session)
    }

    pub fn logout(&mut self) -> Route {
        self.session.logout();
        self.navigator.refresh(&self.session)
    }

    pub fn next_question(&mut self) {
        self.session.next_question();
    }

    pub fn previous_question(&mut self) {
        self.session.previous_question();
    }

    /// Pick an option by key. An exact key wins; otherwise case is ignored.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError` if `key` is not an option of the current question.
    pub fn select_answer(&mut self, key: &str) -> Result<(), SessionStateError> {
        let key = key.trim();
        let resolved = self.session.current_mcq().and_then(|mcq| {
            let options = mcq.options();
            options
                .iter()
                .find(|opt| opt.key == key)
                .or_else(|| options.iter().find(|opt| opt.key.eq_ignore_ascii_case(key)))
                .map(|opt| opt.key.clone())
        });
        self.session.select_answer(resolved.as_deref().unwrap_or(key))
    }

    /// # Errors
    ///
    /// Returns `TutorError` if the explanation request fails.
    pub async fn explain(&mut self) -> Result<ReplyOutcome, TutorError> {
        self.tutor_loop.explain_current(&mut self.session).await
    }

    /// # Errors
    ///
    /// Returns `TutorError` if the chat request fails.
    pub async fn ask(&mut self, text: &str) -> Result<ReplyOutcome, TutorError> {
        self.tutor_loop.ask(&mut self.session, text).await
    }

    #[must_use]
    pub fn question_vm(&self) -> Option<QuestionVm> {
        map_question(&self.session)
    }

    #[must_use]
    pub fn chat_vm(&self) -> ChatVm {
        map_chat(&self.session)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &dyn UiApp) -> AppContext {
    AppContext::new(app)
}
