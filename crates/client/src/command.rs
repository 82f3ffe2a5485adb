//! Session commands typed at the ability prompt.

use talent_core::SlotKey;

/// One line of user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Attempt the ability bound to a letter.
    Use(SlotKey),
    /// Show the detailed cost of the ability bound to a letter.
    Describe(SlotKey),
    /// Exchange two letters.
    Swap(SlotKey, SlotKey),
    List,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("'{0}' is not an ability letter")]
    NotALetter(char),

    #[error("unknown command '{0}' (try a letter, ?letter, =ab, list or quit)")]
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        match line {
            "" | "list" => return Ok(Self::List),
            "quit" | "exit" => return Ok(Self::Quit),
            _ => {}
        }

        let chars: Vec<char> = line.chars().collect();
        match chars.as_slice() {
            [letter] => slot(*letter).map(Self::Use),
            ['?', letter] => slot(*letter).map(Self::Describe),
            ['=', a, b] => Ok(Self::Swap(slot(*a)?, slot(*b)?)),
            _ => Err(CommandError::Unknown(line.to_owned())),
        }
    }
}

fn slot(letter: char) -> Result<SlotKey, CommandError> {
    SlotKey::from_letter(letter).ok_or(CommandError::NotALetter(letter))
}
