mod chat_vm;
mod question_vm;
mod time_fmt;

pub use chat_vm::{ChatLineVm, ChatVm, map_chat};
pub use question_vm::{OptionMarker, OptionRowVm, QuestionVm, map_question};
pub use time_fmt::format_clock_time;
