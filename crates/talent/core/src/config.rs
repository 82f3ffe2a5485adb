//! Ability engine configuration constants and tunable parameters.

use regex::{Regex, RegexBuilder};

use crate::ability::AbilityKind;
use crate::error::{ErrorSeverity, GameError};
use crate::state::SlotKey;

/// Errors raised while building configuration values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("slot rule letters '{0}' contain no slot letter")]
    EmptySlotRule(String),

    #[error("'{0}' is not a slot letter")]
    InvalidSlotLetter(char),

    #[error("piety scaling denominator must be positive")]
    ZeroDenominator,
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPattern { .. } => "CONFIG_INVALID_PATTERN",
            Self::EmptySlotRule(_) => "CONFIG_EMPTY_SLOT_RULE",
            Self::InvalidSlotLetter(_) => "CONFIG_INVALID_SLOT_LETTER",
            Self::ZeroDenominator => "CONFIG_ZERO_DENOMINATOR",
        }
    }
}

/// Case-insensitive pattern matched against ability names.
///
/// Equality compares the source text.
#[derive(Clone, Debug)]
pub struct TextPattern {
    regex: Regex,
}

impl TextPattern {
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map(|regex| Self { regex })
            .map_err(|err| ConfigError::InvalidPattern {
                pattern: pattern.to_owned(),
                reason: err.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for TextPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for TextPattern {}

#[cfg(feature = "serde")]
impl serde::Serialize for TextPattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TextPattern {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = <String as serde::Deserialize>::deserialize(deserializer)?;
        TextPattern::new(&source).map_err(serde::de::Error::custom)
    }
}

/// Rule binding abilities whose name matches `pattern` to preferred letters.
///
/// `letters` lists candidate slots in order. A `+` switches on overwriting
/// occupied slots for the letters after it, a `-` switches it off again.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotRule {
    pub pattern: TextPattern,
    pub letters: String,
}

/// One letter of a slot rule together with its overwrite mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotChoice {
    pub slot: SlotKey,
    pub overwrite: bool,
}

impl SlotRule {
    pub fn new(pattern: &str, letters: &str) -> Result<Self, ConfigError> {
        let rule = Self {
            pattern: TextPattern::new(pattern)?,
            letters: letters.to_owned(),
        };
        rule.validate()?;
        Ok(rule)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for letter in self.letters.chars() {
            if letter != '+' && letter != '-' && SlotKey::from_letter(letter).is_none() {
                return Err(ConfigError::InvalidSlotLetter(letter));
            }
        }
        if self.choices().next().is_none() {
            return Err(ConfigError::EmptySlotRule(self.letters.clone()));
        }
        Ok(())
    }

    /// Candidate slots in order, skipping anything that is not a letter.
    pub fn choices(&self) -> impl Iterator<Item = SlotChoice> + '_ {
        let mut overwrite = false;
        self.letters.chars().filter_map(move |letter| match letter {
            '+' => {
                overwrite = true;
                None
            }
            '-' => {
                overwrite = false;
                None
            }
            other => SlotKey::from_letter(other).map(|slot| SlotChoice { slot, overwrite }),
        })
    }
}

/// Piety multiplier applied to a subset of abilities.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PietyScaling {
    pub abilities: Vec<AbilityKind>,
    pub numerator: i32,
    pub denominator: i32,
}

impl PietyScaling {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.denominator <= 0 {
            return Err(ConfigError::ZeroDenominator);
        }
        Ok(())
    }
}

/// Ability engine configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TalentConfig {
    /// Nutrition that must remain after twice the food cost.
    pub hunger_margin: i32,
    /// Default first slot for non-faith abilities.
    pub first_slot: char,
    /// Default first slot for faith abilities.
    pub invocation_first_slot: char,
    /// Abilities that ask for confirmation before use.
    pub confirm: Vec<TextPattern>,
    /// Preferred slots applied after each assignment.
    pub slot_rules: Vec<SlotRule>,
    pub piety_scaling: Option<PietyScaling>,
}

impl TalentConfig {
    // ===== compile-time constants =====
    /// Slot letters `a..z`, `A..Z`.
    pub const SLOT_COUNT: usize = 52;
    pub const MAX_SKILL_LEVEL: i32 = 27;
    pub const PIETY_BREAKPOINTS: [i32; 6] = [30, 50, 75, 100, 120, 160];
    /// Experience levels taken by Ru's sacrifice of experience.
    pub const RU_SAC_XP_LEVELS: i32 = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HUNGER_MARGIN: i32 = 50;
    pub const DEFAULT_FIRST_SLOT: char = 'f';
    pub const DEFAULT_INVOCATION_FIRST_SLOT: char = 'a';

    pub fn new() -> Self {
        Self {
            hunger_margin: Self::DEFAULT_HUNGER_MARGIN,
            first_slot: Self::DEFAULT_FIRST_SLOT,
            invocation_first_slot: Self::DEFAULT_INVOCATION_FIRST_SLOT,
            confirm: Vec::new(),
            slot_rules: Vec::new(),
            piety_scaling: None,
        }
    }

    /// Piety needed for the `rank`-th breakpoint (1-based); 0 below rank 1.
    pub fn piety_breakpoint(rank: i32) -> i32 {
        if rank <= 0 {
            return 0;
        }
        let index = (rank as usize - 1).min(Self::PIETY_BREAKPOINTS.len() - 1);
        Self::PIETY_BREAKPOINTS[index]
    }

    /// Checks the parts serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for letter in [self.first_slot, self.invocation_first_slot] {
            if SlotKey::from_letter(letter).is_none() {
                return Err(ConfigError::InvalidSlotLetter(letter));
            }
        }
        for rule in &self.slot_rules {
            rule.validate()?;
        }
        if let Some(scaling) = &self.piety_scaling {
            scaling.validate()?;
        }
        Ok(())
    }

    pub fn with_confirm(mut self, pattern: &str) -> Result<Self, ConfigError> {
        self.confirm.push(TextPattern::new(pattern)?);
        Ok(self)
    }

    pub fn with_slot_rule(mut self, pattern: &str, letters: &str) -> Result<Self, ConfigError> {
        self.slot_rules.push(SlotRule::new(pattern, letters)?);
        Ok(self)
    }
}

impl Default for TalentConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_ignore_case() {
        let pattern = TextPattern::new("renounce").unwrap();
        assert!(pattern.matches("Renounce Religion"));
        assert!(!pattern.matches("Recite"));
        assert_eq!(pattern, TextPattern::new("renounce").unwrap());
    }

    #[test]
    fn bad_pattern_is_rejected() {
        assert!(matches!(
            TextPattern::new("(unclosed"),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn slot_rule_overwrite_markers() {
        let rule = SlotRule::new("breathe", "ab+cd-e").unwrap();
        let choices: Vec<(char, bool)> = rule
            .choices()
            .map(|choice| (choice.slot.letter(), choice.overwrite))
            .collect();
        assert_eq!(
            choices,
            vec![
                ('a', false),
                ('b', false),
                ('c', true),
                ('d', true),
                ('e', false)
            ]
        );
    }

    #[test]
    fn slot_rule_needs_letters() {
        assert_eq!(
            SlotRule::new("x", "+-"),
            Err(ConfigError::EmptySlotRule("+-".into()))
        );
        assert_eq!(
            SlotRule::new("x", "a1"),
            Err(ConfigError::InvalidSlotLetter('1'))
        );
    }

    #[test]
    fn breakpoints_by_rank() {
        assert_eq!(TalentConfig::piety_breakpoint(0), 0);
        assert_eq!(TalentConfig::piety_breakpoint(2), 50);
        assert_eq!(TalentConfig::piety_breakpoint(5), 120);
        assert_eq!(TalentConfig::piety_breakpoint(9), 160);
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(TalentConfig::default().validate(), Ok(()));
        let mut config = TalentConfig::default();
        config.first_slot = '?';
        assert_eq!(config.validate(), Err(ConfigError::InvalidSlotLetter('?')));
    }
}
