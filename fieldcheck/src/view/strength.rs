use serde::Serialize;

/// Password strength shown under the first password field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum StrengthLabel {
    VeryWeak,
    Weak,
    Okay,
    Good,
    Strong,
}

impl StrengthLabel {
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => Self::VeryWeak,
            1 => Self::Weak,
            2 => Self::Okay,
            3 => Self::Good,
            _ => Self::Strong,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Self::VeryWeak => "Very weak",
            Self::Weak => "Weak",
            Self::Okay => "Okay",
            Self::Good => "Good",
            Self::Strong => "Strong",
        }
    }
}

/// One point each for: 8+ characters, mixed case, a digit, a symbol.
pub fn password_score(password: &str) -> u8 {
    let checks = [
        password.chars().count() >= 8,
        password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    checks.iter().filter(|&&c| c).count() as u8
}

pub fn password_strength(password: &str) -> StrengthLabel {
    StrengthLabel::from_score(password_score(password))
}
