//! Process-wide study session state.
//!
//! `SessionState` is the single mutable object a front-end holds for one user.
//! It owns the transcript and the cursor into the shared `QuestionSet`; the
//! question records themselves are only borrowed.

use thiserror::Error;

use crate::model::{ChatMessage, ChatRole, Mcq, QuestionSet};
use crate::time::Clock;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStateError {
    #[error("no question is available")]
    NoQuestion,

    #[error("question {index} is out of range (total {total})")]
    IndexOutOfRange { index: usize, total: usize },

    #[error("option {key:?} does not exist for this question")]
    UnknownOption { key: String },
}

/// Outcome of the student's pick for the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerStatus {
    Unanswered,
    Correct,
    Incorrect,
}

/// Identifies the session state an AI request was started from.
///
/// A reply is only applied when its ticket still matches the session. A
/// question change, logout or transcript clear invalidates it, and so does
/// an applied reply from another request taken at the same point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
    question_index: usize,
}

impl RequestTicket {
    #[must_use]
    pub fn question_index(&self) -> usize {
        self.question_index
    }
}

#[derive(Debug, Clone)]
pub struct SessionState {
    questions: QuestionSet,
    clock: Clock,
    authenticated: bool,
    user_email: Option<String>,
    current_index: usize,
    transcript: Vec<ChatMessage>,
    chat_panel_open: bool,
    selected_answer: Option<String>,
    generation: u64,
}

impl SessionState {
    #[must_use]
    pub fn new(questions: QuestionSet) -> Self {
        Self {
            questions,
            clock: Clock::default(),
            authenticated: false,
            user_email: None,
            current_index: 0,
            transcript: Vec::new(),
            chat_panel_open: false,
            selected_answer: None,
            generation: 0,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    // ─── Authentication ─────────────────────────────────────────────────────

    /// Mark the session as logged in. The email is stored verbatim.
    pub fn login(&mut self, email: impl Into<String>) {
        self.authenticated = true;
        self.user_email = Some(email.into());
    }

    /// Reset the session to its defaults. Calling it again changes nothing.
    pub fn logout(&mut self) {
        self.authenticated = false;
        self.user_email = None;
        self.current_index = 0;
        self.chat_panel_open = false;
        self.reset_question_state();
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    #[must_use]
    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }

    // ─── Navigation ─────────────────────────────────────────────────────────

    /// Advance to the next question. Stays put on the last one; the
    /// transcript is cleared either way.
    pub fn next_question(&mut self) {
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
        }
        self.reset_question_state();
    }

    /// Go back one question. Stays put on the first one; the transcript is
    /// cleared either way.
    pub fn previous_question(&mut self) {
        self.current_index = self.current_index.saturating_sub(1);
        self.reset_question_state();
    }

    /// Jump straight to `index`.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::IndexOutOfRange` if `index` is not a valid
    /// position; the session is left untouched.
    pub fn go_to_question(&mut self, index: usize) -> Result<(), SessionStateError> {
        let total = self.questions.len();
        if index >= total {
            return Err(SessionStateError::IndexOutOfRange { index, total });
        }
        self.current_index = index;
        self.reset_question_state();
        Ok(())
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current_mcq(&self) -> Option<&Mcq> {
        self.questions.get(self.current_index)
    }

    #[must_use]
    pub fn total_mcqs(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    /// Percentage of the set reached, counting the current question.
    ///
    /// An empty set reports 0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        let total = self.questions.len();
        if total == 0 {
            return 0.0;
        }
        (self.current_index + 1) as f64 / total as f64 * 100.0
    }

    // ─── Answering ──────────────────────────────────────────────────────────

    /// Record the student's choice for the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::NoQuestion` for an empty set and
    /// `SessionStateError::UnknownOption` if `key` is not one of the options.
    pub fn select_answer(&mut self, key: &str) -> Result<(), SessionStateError> {
        let mcq = self.current_mcq().ok_or(SessionStateError::NoQuestion)?;
        if mcq.option(key).is_none() {
            return Err(SessionStateError::UnknownOption {
                key: key.to_owned(),
            });
        }
        self.selected_answer = Some(key.to_owned());
        Ok(())
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<&str> {
        self.selected_answer.as_deref()
    }

    #[must_use]
    pub fn answer_status(&self) -> AnswerStatus {
        match (self.current_mcq(), self.selected_answer.as_deref()) {
            (Some(mcq), Some(key)) if mcq.is_correct(key) => AnswerStatus::Correct,
            (Some(_), Some(_)) => AnswerStatus::Incorrect,
            _ => AnswerStatus::Unanswered,
        }
    }

    // ─── Chat ───────────────────────────────────────────────────────────────

    pub fn toggle_chat(&mut self) {
        self.chat_panel_open = !self.chat_panel_open;
    }

    #[must_use]
    pub fn is_chat_open(&self) -> bool {
        self.chat_panel_open
    }

    /// Append a message stamped with a fresh id and the clock's time.
    pub fn add_chat_message(&mut self, role: ChatRole, content: impl Into<String>) -> &ChatMessage {
        let message = ChatMessage::new(role, content, self.clock.now());
        self.transcript.push(message);
        &self.transcript[self.transcript.len() - 1]
    }

    pub fn clear_chat(&mut self) {
        self.transcript.clear();
        self.generation += 1;
    }

    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    // ─── In-flight requests ─────────────────────────────────────────────────

    /// Take a ticket for a new AI request. The session itself is not touched.
    #[must_use]
    pub fn begin_request(&self) -> RequestTicket {
        RequestTicket {
            generation: self.generation,
            question_index: self.current_index,
        }
    }

    #[must_use]
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.generation == self.generation && ticket.question_index == self.current_index
    }

    /// Append an assistant reply if `ticket` is still current.
    ///
    /// Applying a reply retires every other outstanding ticket. Returns `None`
    /// and leaves the transcript alone for a stale ticket.
    pub fn accept_reply(
        &mut self,
        ticket: RequestTicket,
        content: impl Into<String>,
    ) -> Option<&ChatMessage> {
        if !self.is_current(ticket) {
            return None;
        }
        self.generation += 1;
        Some(self.add_chat_message(ChatRole::Assistant, content))
    }

    fn reset_question_state(&mut self) {
        self.transcript.clear();
        self.selected_answer = None;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::model::{AnswerOption, QuestionId};
    use crate::time::{fixed_clock, fixed_now};

    fn question(id: u32) -> Mcq {
        Mcq::new(
            QuestionId::new(id),
            "Primary Care",
            format!("Question {id}?"),
            vec![
                AnswerOption::new("A", "alpha"),
                AnswerOption::new("B", "bravo"),
                AnswerOption::new("C", "charlie"),
                AnswerOption::new("D", "delta"),
            ],
            AnswerOption::new("B", "bravo"),
        )
    }

    fn session_with(count: u32) -> SessionState {
        let questions = (1..=count).map(question).collect::<Vec<_>>();
        SessionState::new(QuestionSet::new(questions)).with_clock(fixed_clock())
    }

    #[test]
    fn navigation_stays_in_bounds_and_clears_transcript() {
        let mut session = session_with(3);

        session.add_chat_message(ChatRole::User, "hi");
        session.previous_question();
        assert_eq!(session.current_index(), 0);
        assert!(session.transcript().is_empty());

        for expected in [1, 2, 2, 2] {
            session.add_chat_message(ChatRole::User, "hi");
            session.next_question();
            assert_eq!(session.current_index(), expected);
            assert!(session.transcript().is_empty());
        }

        for expected in [1, 0, 0] {
            session.add_chat_message(ChatRole::Assistant, "hello");
            session.previous_question();
            assert_eq!(session.current_index(), expected);
            assert!(session.transcript().is_empty());
        }
    }

    #[test]
    fn progress_matches_position() {
        let mut session = session_with(4);
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(session.progress());
            session.next_question();
        }
        assert_eq!(seen, vec![25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn empty_set_reports_zero_progress_and_no_question() {
        let mut session = session_with(0);
        assert_eq!(session.total_mcqs(), 0);
        assert_eq!(session.progress(), 0.0);
        assert!(session.current_mcq().is_none());
        session.next_question();
        session.previous_question();
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.select_answer("A"), Err(SessionStateError::NoQuestion));
    }

    #[test]
    fn add_chat_message_appends_in_order_with_unique_ids() {
        let mut session = session_with(1);
        for n in 0..10 {
            let role = if n % 2 == 0 { ChatRole::User } else { ChatRole::Assistant };
            session.add_chat_message(role, format!("m{n}"));
        }

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 10);
        let contents = transcript.iter().map(ChatMessage::content).collect::<Vec<_>>();
        assert_eq!(contents[0], "m0");
        assert_eq!(contents[9], "m9");
        let ids = transcript.iter().map(ChatMessage::id).collect::<HashSet<_>>();
        assert_eq!(ids.len(), 10);
        assert!(transcript.iter().all(|m| m.timestamp() == fixed_now()));
    }

    #[test]
    fn logout_is_idempotent_and_resets_everything() {
        let mut session = session_with(3);
        session.login("np@example.com");
        session.next_question();
        session.toggle_chat();
        session.select_answer("C").unwrap();
        session.add_chat_message(ChatRole::User, "why?");

        session.logout();
        let snapshot = (
            session.is_authenticated(),
            session.user_email().map(str::to_owned),
            session.current_index(),
            session.transcript().len(),
            session.is_chat_open(),
            session.selected_answer().map(str::to_owned),
        );
        session.logout();
        let again = (
            session.is_authenticated(),
            session.user_email().map(str::to_owned),
            session.current_index(),
            session.transcript().len(),
            session.is_chat_open(),
            session.selected_answer().map(str::to_owned),
        );

        assert_eq!(snapshot, (false, None, 0, 0, false, None));
        assert_eq!(snapshot, again);
    }

    #[test]
    fn login_stores_email_verbatim() {
        let mut session = session_with(1);
        assert!(!session.is_authenticated());
        session.login("  Someone@Example.COM ");
        assert!(session.is_authenticated());
        assert_eq!(session.user_email(), Some("  Someone@Example.COM "));
    }

    #[test]
    fn toggle_chat_only_flips_panel() {
        let mut session = session_with(2);
        session.add_chat_message(ChatRole::User, "keep me");
        session.toggle_chat();
        assert!(session.is_chat_open());
        session.toggle_chat();
        assert!(!session.is_chat_open());
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn go_to_question_validates_index() {
        let mut session = session_with(3);
        session.go_to_question(2).unwrap();
        assert_eq!(session.current_index(), 2);
        assert_eq!(
            session.go_to_question(3),
            Err(SessionStateError::IndexOutOfRange { index: 3, total: 3 })
        );
        assert_eq!(session.current_index(), 2);
    }

    #[test]
    fn answer_selection_tracks_correctness() {
        let mut session = session_with(2);
        assert_eq!(session.answer_status(), AnswerStatus::Unanswered);

        session.select_answer("C").unwrap();
        assert_eq!(session.answer_status(), AnswerStatus::Incorrect);
        session.select_answer("B").unwrap();
        assert_eq!(session.answer_status(), AnswerStatus::Correct);

        let err = session.select_answer("E").unwrap_err();
        assert_eq!(err, SessionStateError::UnknownOption { key: "E".into() });
        assert_eq!(session.selected_answer(), Some("B"));

        session.next_question();
        assert_eq!(session.answer_status(), AnswerStatus::Unanswered);
    }

    #[test]
    fn reply_is_applied_only_for_current_ticket() {
        let mut session = session_with(3);

        let ticket = session.begin_request();
        assert!(session.accept_reply(ticket, "fresh").is_some());
        assert_eq!(session.transcript().len(), 1);

        let ticket = session.begin_request();
        session.next_question();
        assert!(session.accept_reply(ticket, "late").is_none());
        assert!(session.transcript().is_empty());

        let ticket = session.begin_request();
        session.clear_chat();
        assert!(session.accept_reply(ticket, "late").is_none());

        let first = session.begin_request();
        let second = session.begin_request();
        assert!(session.is_current(first));
        assert!(session.accept_reply(second, "second").is_some());
        assert!(!session.is_current(first));
        assert!(session.accept_reply(first, "first").is_none());

        let ticket = session.begin_request();
        session.logout();
        assert!(session.accept_reply(ticket, "late").is_none());
    }

    #[test]
    fn taking_a_ticket_leaves_session_untouched() {
        let session = session_with(2);
        let before = session.clone();

        let ticket = session.begin_request();
        assert!(session.is_current(ticket));
        assert_eq!(session.generation, before.generation);
        assert_eq!(session.transcript().len(), before.transcript().len());
    }
}
