//! The built-in tree forms.

use crate::error::TreeError;
use crate::grammar::{Grammar, RuleSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which selector a preset belongs to on a host control panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresetGroup {
    Primary,
    Secondary,
}

/// A named axiom and rule set.
///
/// All presets share the trunk elongation rule `F -> FF`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    /// Five-way crown alternating between two growth symbols.
    #[default]
    Standard,
    /// Four-way fan with fruiting side shoots.
    Dispersed,
    /// Asymmetric, bending growth.
    Curved,
    /// Leaning crown.
    Slant,
    /// Regular four-way lattice.
    Square,
    /// Stacked trunk with side shoots at each segment.
    Curved2,
    /// Paired drooping shoots.
    Weeping,
}

impl Preset {
    pub const ALL: [Preset; 7] = [
        Preset::Standard,
        Preset::Dispersed,
        Preset::Curved,
        Preset::Slant,
        Preset::Square,
        Preset::Curved2,
        Preset::Weeping,
    ];

    pub const PRIMARY: [Preset; 4] = [
        Preset::Standard,
        Preset::Dispersed,
        Preset::Curved,
        Preset::Slant,
    ];

    pub const SECONDARY: [Preset; 3] = [Preset::Square, Preset::Curved2, Preset::Weeping];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Standard => "Standard",
            Preset::Dispersed => "Dispersed",
            Preset::Curved => "Curved",
            Preset::Slant => "Slant",
            Preset::Square => "Square",
            Preset::Curved2 => "Curved2",
            Preset::Weeping => "Weeping",
        }
    }

    pub fn group(self) -> PresetGroup {
        match self {
            Preset::Standard | Preset::Dispersed | Preset::Curved | Preset::Slant => {
                PresetGroup::Primary
            }
            Preset::Square | Preset::Curved2 | Preset::Weeping => PresetGroup::Secondary,
        }
    }

    pub fn axiom(self) -> &'static str {
        match self {
            Preset::Standard => "C",
            Preset::Dispersed => "A",
            Preset::Curved => "G",
            Preset::Slant => "Y",
            Preset::Square => "K",
            Preset::Curved2 => "H",
            Preset::Weeping => "W",
        }
    }

    /// Productions specific to this form, excluding the shared `F -> FF`.
    fn productions(self) -> &'static [(char, &'static str)] {
        match self {
            Preset::Standard => &[
                ('C', "F[+|Dl][-/Dl][/Dl][|Dl][Dl]"),
                ('D', "FF[+/FCla][-|FCla]"),
            ],
            Preset::Dispersed => &[
                ('A', "FF[+FBl][-FBl][/FBl][|FBl]"),
                ('B', "F[/FAla][|FAla]"),
            ],
            Preset::Curved => &[('G', "F-[[|Gl]+G]+F[+FGla]-G")],
            Preset::Slant => &[('Y', "F[+FYl][|Yl][-/FY]+F[-FYla]")],
            Preset::Square => &[('K', "F[+K][-Kla][/K][|Kla]")],
            Preset::Curved2 => &[('H', "F[+Hl]F[-H]F[/H]F[|Ha][[+Fl]]")],
            Preset::Weeping => &[('W', "F[-/Wl][+|Wl]F[/-Wla]")],
        }
    }

    pub fn rules(self) -> RuleSet {
        self.productions()
            .iter()
            .fold(RuleSet::new().with_rule('F', "FF"), |rules, &(sym, rep)| {
                rules.with_rule(sym, rep)
            })
    }

    pub fn grammar(self) -> Grammar {
        Grammar::new(self.axiom(), self.rules())
    }

    /// Resolves a selection from two 1-based radio controls.
    ///
    /// A primary selection takes precedence; `None` or an out-of-range index
    /// means that control has nothing selected.
    pub fn from_controls(primary: Option<usize>, secondary: Option<usize>) -> Option<Preset> {
        let pick = |set: &[Preset], idx: Option<usize>| {
            idx.and_then(|i| i.checked_sub(1)).and_then(|i| set.get(i).copied())
        };
        pick(&Self::PRIMARY[..], primary).or_else(|| pick(&Self::SECONDARY[..], secondary))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TreeError::UnknownPreset(s.to_owned()))
    }
}
