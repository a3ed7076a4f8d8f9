use serde::{Deserialize, Serialize};

/// Binary target: did the next close finish strictly above this close?
/// `Down` also covers unchanged closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    Down = 0,
    Up = 1,
}

impl Label {
    pub fn from_closes(today: f64, tomorrow: f64) -> Self {
        (tomorrow > today).into()
    }

    pub fn is_up(self) -> bool {
        self == Label::Up
    }

    /// 0.0 or 1.0; doubles as the position size of the long/flat rule.
    pub fn as_f64(self) -> f64 {
        match self {
            Label::Down => 0.0,
            Label::Up => 1.0,
        }
    }
}

impl From<bool> for Label {
    fn from(up: bool) -> Self {
        if up { Label::Up } else { Label::Down }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", *self as u8)
    }
}
