use std::fmt::Display;

use ansi_term::Colour;

/// Rounded share of `count` in `total`, half-up, capped at 100. A zero total
/// is an empty report, not a division error.
pub fn share_percent(count: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    ((200 * count + total) / (2 * total)).min(100) as u8
}

/// Coarse band for a completion ratio. Thresholds are inclusive lower bounds,
/// so a ratio of exactly 0.9 is ELITE rather than VETERAN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PerformanceTier {
    Trainee,
    Recruit,
    Soldier,
    Veteran,
    Elite,
}

impl PerformanceTier {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 0.9 {
            Self::Elite
        } else if ratio >= 0.75 {
            Self::Veteran
        } else if ratio >= 0.6 {
            Self::Soldier
        } else if ratio >= 0.4 {
            Self::Recruit
        } else {
            Self::Trainee
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Elite => "ELITE",
            Self::Veteran => "VETERAN",
            Self::Soldier => "SOLDIER",
            Self::Recruit => "RECRUIT",
            Self::Trainee => "TRAINEE",
        }
    }

    pub fn colour(&self) -> Colour {
        match self {
            Self::Elite => Colour::Purple,
            Self::Veteran => Colour::Green,
            Self::Soldier => Colour::Blue,
            Self::Recruit => Colour::Yellow,
            Self::Trainee => Colour::Red,
        }
    }
}

impl Display for PerformanceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
