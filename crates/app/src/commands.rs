use std::fmt;

use ui::Route;

/// One line of user input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login(String),
    Logout,
    Go(Route),
    Next,
    Prev,
    Show,
    Select(String),
    Explain,
    Ask(String),
    ToggleChat,
    ClearChat,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    MissingValue { command: &'static str },
    UnknownRoute(String),
    Unknown(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => write!(f, "type a command, or `help`"),
            CommandError::MissingValue { command } => write!(f, "{command} requires a value"),
            CommandError::UnknownRoute(raw) => write!(f, "no such page: {raw}"),
            CommandError::Unknown(raw) => write!(f, "unknown command: {raw} (try `help`)"),
        }
    }
}

impl std::error::Error for CommandError {}

impl Command {
    /// Parse a line such as `login me@example.com` or `ask why not C?`.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` for blank input, unknown commands, or a missing argument.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        let require = |command: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingValue { command })
            } else {
                Ok(rest.to_owned())
            }
        };

        match head.to_ascii_lowercase().as_str() {
            "login" => require("login").map(Command::Login),
            "logout" => Ok(Command::Logout),
            "go" => {
                let raw = require("go")?;
                let path = if raw.starts_with('/') {
                    raw.clone()
                } else {
                    format!("/{raw}")
                };
                Route::from_path(&path)
                    .map(Command::Go)
                    .ok_or(CommandError::UnknownRoute(raw))
            }
            "next" | "n" => Ok(Command::Next),
            "prev" | "p" => Ok(Command::Prev),
            "show" | "s" => Ok(Command::Show),
            "select" | "answer" => require("select").map(Command::Select),
            "explain" => Ok(Command::Explain),
            "ask" => require("ask").map(Command::Ask),
            "chat" => Ok(Command::ToggleChat),
            "clear" => Ok(Command::ClearChat),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(head.to_owned())),
        }
    }
}

pub const HELP: &str = "\
Commands:
  login <email>     sign in (no password needed)
  logout            sign out and reset progress
  go <page>         open a page: login, home, exams
  next | prev       move between questions
  show              redraw the current page
  select <key>      answer the current question (e.g. `select B`)
  explain           ask the tutor to explain the current question
  ask <text>        chat with the tutor about the current question
  chat              show or hide the chat panel
  clear             clear the chat transcript
  help              show this list
  quit              leave";
