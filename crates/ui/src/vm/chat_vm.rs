use tutor_core::SessionState;
use tutor_core::model::{ChatRole, MessageId};

use super::time_fmt::format_clock_time;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatLineVm {
    pub id: MessageId,
    pub author: &'static str,
    pub text: String,
    pub time_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatVm {
    pub open: bool,
    pub lines: Vec<ChatLineVm>,
}

impl ChatVm {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[must_use]
pub fn map_chat(session: &SessionState) -> ChatVm {
    let lines = session
        .transcript()
        .iter()
        .map(|message| ChatLineVm {
            id: message.id(),
            author: match message.role() {
                ChatRole::User => "You",
                ChatRole::Assistant => "Tutor",
            },
            text: message.content().to_owned(),
            time_label: format_clock_time(message.timestamp()),
        })
        .collect();

    ChatVm {
        open: session.is_chat_open(),
        lines,
    }
}
