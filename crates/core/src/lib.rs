#![forbid(unsafe_code)]

pub mod model;
pub mod session;
pub mod time;

pub use session::{AnswerStatus, RequestTicket, SessionState, SessionStateError};
pub use time::Clock;
