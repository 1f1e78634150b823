use services::SessionCommand;

/// One line of user input, decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// 0-based option index.
    Select(usize),
    Submit,
    Next,
    Restart,
    Quit,
    Help,
    Unknown,
}

impl Input {
    /// The session command for this input, aimed at the question on screen.
    #[must_use]
    pub fn command(self, question: usize) -> Option<SessionCommand> {
        match self {
            Input::Select(option) => Some(SessionCommand::Select { question, option }),
            Input::Submit => Some(SessionCommand::Submit { question }),
            Input::Next => Some(SessionCommand::Advance { question }),
            Input::Restart => Some(SessionCommand::Restart),
            Input::Quit | Input::Help | Input::Unknown => None,
        }
    }
}

#[must_use]
pub fn parse_line(line: &str) -> Input {
    let line = line.trim();
    if let Ok(n) = line.parse::<usize>() {
        // Options are shown 1-based.
        return n.checked_sub(1).map_or(Input::Unknown, Input::Select);
    }

    match line.to_ascii_lowercase().as_str() {
        "s" | "submit" => Input::Submit,
        "n" | "next" => Input::Next,
        "r" | "restart" => Input::Restart,
        "q" | "quit" | "exit" => Input::Quit,
        "?" | "h" | "help" => Input::Help,
        _ => Input::Unknown,
    }
}

pub const HELP: &str = "1-4 select an option, s submit, n next, r restart, q quit";
