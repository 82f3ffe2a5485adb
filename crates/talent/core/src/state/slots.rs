//! Input slots: the 52 letters `a..z`, `A..Z` bound to abilities.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::ability::AbilityKind;
use crate::config::TalentConfig;

/// One of the 52 hotkey letters, stored as its table index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey(u8);

impl SlotKey {
    /// Maps `a..z` to 0..26 and `A..Z` to 26..52.
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'a'..='z' => Some(Self(letter as u8 - b'a')),
            'A'..='Z' => Some(Self(letter as u8 - b'A' + 26)),
            _ => None,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < TalentConfig::SLOT_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn letter(self) -> char {
        if self.0 < 26 {
            (b'a' + self.0) as char
        } else {
            (b'A' + self.0 - 26) as char
        }
    }

    /// Every slot in table order.
    pub fn all() -> impl DoubleEndedIterator<Item = SlotKey> + ExactSizeIterator {
        (0..TalentConfig::SLOT_COUNT as u8).map(SlotKey)
    }
}

impl core::fmt::Display for SlotKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Slot table mapping each letter to an ability (or the empty sentinel).
///
/// The table always holds exactly [`TalentConfig::SLOT_COUNT`] entries.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "BTreeMap<char, AbilityKind>", into = "BTreeMap<char, AbilityKind>")
)]
pub struct SlotTable {
    entries: ArrayVec<AbilityKind, { TalentConfig::SLOT_COUNT }>,
}

impl SlotTable {
    pub fn new() -> Self {
        let mut entries = ArrayVec::new();
        for _ in 0..TalentConfig::SLOT_COUNT {
            entries.push(AbilityKind::None);
        }
        Self { entries }
    }

    pub fn get(&self, slot: SlotKey) -> AbilityKind {
        self.entries
            .get(slot.index())
            .copied()
            .unwrap_or(AbilityKind::None)
    }

    pub fn set(&mut self, slot: SlotKey, kind: AbilityKind) {
        if let Some(entry) = self.entries.get_mut(slot.index()) {
            *entry = kind;
        }
    }

    pub fn clear(&mut self, slot: SlotKey) {
        self.set(slot, AbilityKind::None);
    }

    pub fn is_empty(&self, slot: SlotKey) -> bool {
        self.get(slot).is_none()
    }

    /// First slot bound to `kind`.
    pub fn position(&self, kind: AbilityKind) -> Option<SlotKey> {
        if kind.is_none() {
            return None;
        }
        self.entries
            .iter()
            .position(|entry| *entry == kind)
            .and_then(SlotKey::from_index)
    }

    pub fn swap(&mut self, a: SlotKey, b: SlotKey) {
        self.entries.swap(a.index(), b.index());
    }

    /// Occupied slots in table order.
    pub fn bound(&self) -> impl Iterator<Item = (SlotKey, AbilityKind)> + '_ {
        SlotKey::all()
            .map(|slot| (slot, self.get(slot)))
            .filter(|(_, kind)| !kind.is_none())
    }
}

impl Default for SlotTable {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BTreeMap<char, AbilityKind>> for SlotTable {
    fn from(map: BTreeMap<char, AbilityKind>) -> Self {
        let mut table = SlotTable::new();
        for (letter, kind) in map {
            if let Some(slot) = SlotKey::from_letter(letter) {
                table.set(slot, kind);
            }
        }
        table
    }
}

impl From<SlotTable> for BTreeMap<char, AbilityKind> {
    fn from(table: SlotTable) -> Self {
        table
            .bound()
            .map(|(slot, kind)| (slot.letter(), kind))
            .collect()
    }
}
