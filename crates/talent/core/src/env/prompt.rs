//! Prompt oracle: synchronous questions put to the player mid-attempt.
//!
//! Every method may return "cancelled" (`false` / `None`), which aborts the
//! attempt without spending a turn.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::ability::AbilityKind;

/// What a targeting prompt is aiming.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetRequest {
    pub ability: AbilityKind,
    pub range: i32,
    /// Must land on a monster rather than any square.
    pub needs_monster: bool,
}

/// A chosen target, relative to the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    pub dx: i32,
    pub dy: i32,
}

impl Target {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    pub const fn is_self(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// Interactive collaborator for yes/no, targeting and item menus.
pub trait PromptOracle {
    fn confirm(&self, question: &str) -> bool;

    fn choose_target(&self, request: &TargetRequest) -> Option<Target>;

    /// Picks one of `options` by index.
    fn choose_item(&self, title: &str, options: &[String]) -> Option<usize>;
}

/// Prompt oracle answering from queued scripts.
///
/// When a queue runs dry, confirmations decline and choices cancel.
#[derive(Debug, Default)]
pub struct ScriptedPrompts {
    confirms: RefCell<VecDeque<bool>>,
    targets: RefCell<VecDeque<Option<Target>>>,
    items: RefCell<VecDeque<Option<usize>>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Agrees to everything and picks the first option and an adjacent target.
    pub fn agreeable(rounds: usize) -> Self {
        let prompts = Self::new();
        for _ in 0..rounds {
            prompts.confirms.borrow_mut().push_back(true);
            prompts.targets.borrow_mut().push_back(Some(Target::new(1, 0)));
            prompts.items.borrow_mut().push_back(Some(0));
        }
        prompts
    }

    #[must_use]
    pub fn confirm_with(self, answer: bool) -> Self {
        self.confirms.borrow_mut().push_back(answer);
        self
    }

    #[must_use]
    pub fn target_with(self, target: Option<Target>) -> Self {
        self.targets.borrow_mut().push_back(target);
        self
    }

    #[must_use]
    pub fn item_with(self, choice: Option<usize>) -> Self {
        self.items.borrow_mut().push_back(choice);
        self
    }

    /// Every question and title shown so far.
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl PromptOracle for ScriptedPrompts {
    fn confirm(&self, question: &str) -> bool {
        self.asked.borrow_mut().push(question.to_owned());
        self.confirms.borrow_mut().pop_front().unwrap_or(false)
    }

    fn choose_target(&self, request: &TargetRequest) -> Option<Target> {
        self.asked
            .borrow_mut()
            .push(format!("target for {}", request.ability));
        self.targets.borrow_mut().pop_front().flatten()
    }

    fn choose_item(&self, title: &str, options: &[String]) -> Option<usize> {
        self.asked.borrow_mut().push(title.to_owned());
        self.items
            .borrow_mut()
            .pop_front()
            .flatten()
            .filter(|index| *index < options.len())
    }
}
