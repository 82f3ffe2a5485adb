//! Fixed facets of the character: species, shape and faith.

use crate::ability::AbilityKind;

/// Playable species relevant to ability availability.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Species {
    #[default]
    Human,
    HighElf,
    DeepDwarf,
    HillOrc,
    Formicid,
    Mummy,
    Vampire,
    Tengu,
    Felid,
    Demonspawn,
    Octopode,
    BaseDraconian,
    RedDraconian,
    WhiteDraconian,
    GreenDraconian,
    YellowDraconian,
    GreyDraconian,
    BlackDraconian,
    PurpleDraconian,
    MottledDraconian,
    PaleDraconian,
}

/// How far a species sits from the living.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UndeadState {
    Alive,
    /// Undead only while thirsty.
    Semi,
    Full,
}

impl Species {
    pub const fn is_draconian(self) -> bool {
        matches!(
            self,
            Self::BaseDraconian
                | Self::RedDraconian
                | Self::WhiteDraconian
                | Self::GreenDraconian
                | Self::YellowDraconian
                | Self::GreyDraconian
                | Self::BlackDraconian
                | Self::PurpleDraconian
                | Self::MottledDraconian
                | Self::PaleDraconian
        )
    }

    pub const fn undead_state(self) -> UndeadState {
        match self {
            Self::Mummy => UndeadState::Full,
            Self::Vampire => UndeadState::Semi,
            _ => UndeadState::Alive,
        }
    }

    /// Species whose hunger never moves.
    pub const fn is_foodless(self) -> bool {
        matches!(self, Self::Mummy)
    }

    /// Breath granted by a draconian's colour, if any.
    pub const fn draconian_breath(self) -> AbilityKind {
        match self {
            Self::RedDraconian => AbilityKind::BreatheFire,
            Self::WhiteDraconian => AbilityKind::BreatheFrost,
            Self::GreenDraconian => AbilityKind::BreatheMephitic,
            Self::YellowDraconian => AbilityKind::SpitAcid,
            Self::BlackDraconian => AbilityKind::BreatheLightning,
            Self::PurpleDraconian => AbilityKind::BreathePower,
            Self::MottledDraconian => AbilityKind::BreatheStickyFlame,
            Self::PaleDraconian => AbilityKind::BreatheSteam,
            _ => AbilityKind::None,
        }
    }
}

/// Current bodily shape.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Form {
    #[default]
    Normal,
    Bat,
    Dragon,
    Tree,
    Statue,
    Spider,
    Lich,
    Shadow,
}

impl Form {
    pub const fn is_transformed(self) -> bool {
        !matches!(self, Self::Normal)
    }

    /// Shapes that replace the body rather than overlay it.
    pub const fn changes_physically(self) -> bool {
        !matches!(self, Self::Normal | Self::Lich | Self::Shadow)
    }

    pub const fn forbids_flight(self) -> bool {
        matches!(self, Self::Tree | Self::Statue)
    }
}

/// Deities a character may worship.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum God {
    #[default]
    NoGod,
    Zin,
    ShiningOne,
    Kikubaaqudgha,
    Yredelemnul,
    Xom,
    Vehumet,
    Okawaru,
    Makhleb,
    SifMuna,
    Trog,
    Elyvilon,
    Lugonu,
    Beogh,
    Jiyva,
    Cheibriados,
    Ashenzari,
    Dithmenos,
    Ru,
}

impl God {
    pub const fn is_none(self) -> bool {
        matches!(self, Self::NoGod)
    }

    /// Name used in messages.
    pub const fn title(self) -> &'static str {
        match self {
            Self::NoGod => "no god",
            Self::Zin => "Zin",
            Self::ShiningOne => "the Shining One",
            Self::Kikubaaqudgha => "Kikubaaqudgha",
            Self::Yredelemnul => "Yredelemnul",
            Self::Xom => "Xom",
            Self::Vehumet => "Vehumet",
            Self::Okawaru => "Okawaru",
            Self::Makhleb => "Makhleb",
            Self::SifMuna => "Sif Muna",
            Self::Trog => "Trog",
            Self::Elyvilon => "Elyvilon",
            Self::Lugonu => "Lugonu",
            Self::Beogh => "Beogh",
            Self::Jiyva => "Jiyva",
            Self::Cheibriados => "Cheibriados",
            Self::Ashenzari => "Ashenzari",
            Self::Dithmenos => "Dithmenos",
            Self::Ru => "Ru",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn draconian_colours_breathe() {
        assert_eq!(Species::RedDraconian.draconian_breath(), AbilityKind::BreatheFire);
        assert!(Species::GreyDraconian.draconian_breath().is_none());
        assert!(Species::BaseDraconian.is_draconian());
        assert!(!Species::Human.is_draconian());
    }

    #[test]
    fn lich_form_keeps_the_body() {
        assert!(Form::Lich.is_transformed());
        assert!(!Form::Lich.changes_physically());
        assert!(Form::Dragon.changes_physically());
    }

    #[test]
    fn god_names_parse() {
        assert_eq!(God::from_str("sif_muna").unwrap(), God::SifMuna);
        assert_eq!(God::ShiningOne.title(), "the Shining One");
    }
}
