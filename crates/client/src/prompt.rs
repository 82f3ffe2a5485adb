//! Line-based prompts over any reader/writer pair.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};

use talent_core::{PromptOracle, SlotKey, Target, TargetRequest};

/// Asks questions on `output` and reads answers from `input`, one per line.
///
/// End of input and I/O errors count as cancelling the question.
pub struct LinePrompt<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
        }
    }

    /// Prints one line.
    pub fn say(&self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output.borrow_mut(), "{}", text.as_ref())
    }

    /// Prints `question` and reads the trimmed answer; `None` at end of input.
    pub fn ask(&self, question: &str) -> io::Result<Option<String>> {
        {
            let mut output = self.output.borrow_mut();
            write!(output, "{} ", question)?;
            output.flush()?;
        }

        let mut line = String::new();
        if self.input.borrow_mut().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    pub fn into_output(self) -> W {
        self.output.into_inner()
    }
}

impl<R: BufRead, W: Write> PromptOracle for LinePrompt<R, W> {
    fn confirm(&self, question: &str) -> bool {
        matches!(
            self.ask(&format!("{} (y/n)", question)),
            Ok(Some(answer)) if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
        )
    }

    fn choose_target(&self, request: &TargetRequest) -> Option<Target> {
        let kind = if request.needs_monster {
            "a monster"
        } else {
            "a square"
        };
        let question = format!(
            "Aim {} at {} within {} (dx dy, blank to cancel):",
            request.ability, kind, request.range
        );
        let answer = self.ask(&question).ok()??;
        parse_target(&answer).filter(|target| {
            target.dx.abs().max(target.dy.abs()) <= request.range.max(0)
        })
    }

    fn choose_item(&self, title: &str, options: &[String]) -> Option<usize> {
        self.say(title).ok()?;
        for (slot, option) in SlotKey::all().zip(options) {
            self.say(format!("  {} - {}", slot, option)).ok()?;
        }

        let answer = self.ask("Which one?").ok()??;
        let mut letters = answer.chars();
        let letter = letters.next()?;
        if letters.next().is_some() {
            return None;
        }
        let index = SlotKey::from_letter(letter)?.index();
        (index < options.len()).then_some(index)
    }
}

/// Parses `"dx dy"`.
fn parse_target(answer: &str) -> Option<Target> {
    let mut parts = answer.split_whitespace();
    let dx = parts.next()?.parse().ok()?;
    let dy = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Target::new(dx, dy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use talent_core::AbilityKind;

    fn prompt(input: &str) -> LinePrompt<Cursor<Vec<u8>>, Vec<u8>> {
        LinePrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn confirm_accepts_yes_only() {
        let answers = prompt("y\nno\nYES\n");
        assert!(answers.confirm("Really?"));
        assert!(!answers.confirm("Really?"));
        assert!(answers.confirm("Really?"));
        assert!(!answers.confirm("Really?"));

        let output = String::from_utf8(answers.into_output()).unwrap();
        assert!(output.starts_with("Really? (y/n) "));
    }

    #[test]
    fn targets_must_be_in_range() {
        let request = TargetRequest {
            ability: AbilityKind::BreatheFire,
            range: 3,
            needs_monster: false,
        };
        let answers = prompt("2 -1\n5 0\n\nnorth\n");
        assert_eq!(answers.choose_target(&request), Some(Target::new(2, -1)));
        assert_eq!(answers.choose_target(&request), None);
        assert_eq!(answers.choose_target(&request), None);
        assert_eq!(answers.choose_target(&request), None);
    }

    #[test]
    fn items_are_picked_by_letter() {
        let options = vec!["a wand of flame".to_owned(), "a wand of frost".to_owned()];
        let answers = prompt("b\nc\n");
        assert_eq!(answers.choose_item("Recharge which item?", &options), Some(1));
        assert_eq!(answers.choose_item("Recharge which item?", &options), None);

        let output = String::from_utf8(answers.into_output()).unwrap();
        assert!(output.contains("  a - a wand of flame"));
    }
}
