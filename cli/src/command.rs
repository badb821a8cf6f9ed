#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Play,
    Flip(usize),
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub(crate) fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "p" | "play" | "r" | "restart" => Self::Play,
            "q" | "quit" | "exit" => Self::Quit,
            "" | "h" | "help" | "?" => Self::Help,
            other => other
                .parse()
                .map_or_else(|_| Self::Unknown(line.to_string()), Self::Flip),
        }
    }
}
