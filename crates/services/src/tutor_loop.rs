use std::sync::Arc;

use tutor_core::model::{ChatMessage, ChatRole, ChatTurn, MessageId};
use tutor_core::{RequestTicket, SessionState};

use crate::error::TutorError;
use crate::prompt::{ExplanationRequest, question_context};
use crate::tutor_service::TutorService;

/// What happened to a finished request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The reply was appended to the transcript under this id.
    Applied(MessageId),
    /// The session moved on while the request was in flight; reply dropped.
    Stale,
}

#[derive(Debug, Clone)]
enum RequestKind {
    Explanation(ExplanationRequest),
    Chat {
        message: String,
        turns: Vec<ChatTurn>,
        context: String,
    },
}

/// A request snapshot taken from the session, ready to run.
///
/// Holds no borrow of the session, so the session stays usable while the
/// request is in flight. Taking one does not change the session.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    ticket: RequestTicket,
    kind: RequestKind,
}

impl PendingRequest {
    #[must_use]
    pub fn ticket(&self) -> RequestTicket {
        self.ticket
    }

    /// Turns that will be sent for a chat request; empty for explanations.
    #[must_use]
    pub fn turns(&self) -> &[ChatTurn] {
        match &self.kind {
            RequestKind::Chat { turns, .. } => turns,
            RequestKind::Explanation(_) => &[],
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompletedRequest {
    ticket: RequestTicket,
    message: Option<String>,
    result: Result<String, TutorError>,
}

/// Moves AI requests between a `SessionState` and the `TutorService`.
///
/// Split into `begin_*` / `run` / `finish` so that replies arriving after the
/// student has navigated away are recognised by their ticket and dropped.
#[derive(Clone)]
pub struct TutorLoopService {
    tutor: Arc<TutorService>,
    history_limit: usize,
}

impl TutorLoopService {
    #[must_use]
    pub fn new(tutor: Arc<TutorService>, history_limit: usize) -> Self {
        Self {
            tutor,
            history_limit: history_limit.max(1),
        }
    }

    #[must_use]
    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Snapshot the current question for an explanation request.
    ///
    /// # Errors
    ///
    /// Returns `TutorError::NoQuestion` if the question set is empty.
    pub fn begin_explanation(&self, session: &SessionState) -> Result<PendingRequest, TutorError> {
        let mcq = session.current_mcq().ok_or(TutorError::NoQuestion)?;
        let request = ExplanationRequest::from_mcq(mcq, session.selected_answer());
        let ticket = session.begin_request();
        Ok(PendingRequest {
            ticket,
            kind: RequestKind::Explanation(request),
        })
    }

    /// Snapshot the recent transcript followed by the student's message.
    ///
    /// The message only enters the transcript once the reply is applied.
    ///
    /// # Errors
    ///
    /// Returns `TutorError::NoQuestion` if the question set is empty.
    pub fn begin_chat(
        &self,
        session: &SessionState,
        text: &str,
    ) -> Result<PendingRequest, TutorError> {
        let mcq = session.current_mcq().ok_or(TutorError::NoQuestion)?;
        let context = question_context(mcq, session.selected_answer());

        let mut turns = recent_turns(session.transcript(), self.history_limit - 1);
        turns.push(ChatTurn::user(text));

        Ok(PendingRequest {
            ticket: session.begin_request(),
            kind: RequestKind::Chat {
                message: text.to_owned(),
                turns,
                context,
            },
        })
    }

    /// Perform the network call. Never touches the session.
    pub async fn run(&self, pending: PendingRequest) -> CompletedRequest {
        match pending.kind {
            RequestKind::Explanation(request) => CompletedRequest {
                ticket: pending.ticket,
                message: None,
                result: self.tutor.get_explanation(&request).await,
            },
            RequestKind::Chat {
                message,
                turns,
                context,
            } => CompletedRequest {
                ticket: pending.ticket,
                result: self.tutor.get_chat_response(&turns, Some(&context)).await,
                message: Some(message),
            },
        }
    }

    /// Apply a finished request to the session.
    ///
    /// A successful chat reply is recorded together with the student's
    /// message. Replies for a ticket that is no longer current are dropped,
    /// whether they succeeded or not.
    ///
    /// # Errors
    ///
    /// Returns the request's `TutorError` when it failed and is still current;
    /// the session is left unchanged.
    pub fn finish(
        &self,
        session: &mut SessionState,
        completed: CompletedRequest,
    ) -> Result<ReplyOutcome, TutorError> {
        if !session.is_current(completed.ticket) {
            tracing::debug!(
                question_index = completed.ticket.question_index(),
                "dropping reply for a stale request"
            );
            return Ok(ReplyOutcome::Stale);
        }

        let text = completed.result?;
        if let Some(message) = completed.message {
            session.add_chat_message(ChatRole::User, message);
        }
        match session.accept_reply(completed.ticket, text) {
            Some(message) => Ok(ReplyOutcome::Applied(message.id())),
            None => Ok(ReplyOutcome::Stale),
        }
    }

    /// Explain the current question and append the answer to the transcript.
    ///
    /// # Errors
    ///
    /// Returns `TutorError` if there is no question or the request fails.
    pub async fn explain_current(
        &self,
        session: &mut SessionState,
    ) -> Result<ReplyOutcome, TutorError> {
        let pending = self.begin_explanation(session)?;
        let completed = self.run(pending).await;
        self.finish(session, completed)
    }

    /// Send a chat message about the current question.
    ///
    /// # Errors
    ///
    /// Returns `TutorError` if there is no question or the request fails.
    pub async fn ask(
        &self,
        session: &mut SessionState,
        text: &str,
    ) -> Result<ReplyOutcome, TutorError> {
        let pending = self.begin_chat(session, text)?;
        let completed = self.run(pending).await;
        self.finish(session, completed)
    }
}

fn recent_turns(transcript: &[ChatMessage], limit: usize) -> Vec<ChatTurn> {
    let start = transcript.len().saturating_sub(limit);
    transcript[start..].iter().map(ChatMessage::to_turn).collect()
}
