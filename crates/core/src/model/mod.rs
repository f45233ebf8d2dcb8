mod chat;
mod ids;
mod mcq;

pub use chat::{ChatMessage, ChatRole, ChatTurn, TurnRole};
pub use ids::{MessageId, ParseIdError, QuestionId};
pub use mcq::{AnswerOption, Mcq, QuestionSet};
