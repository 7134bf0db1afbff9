use serde::Serialize;

/// Claim-rate category printed in column 8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum DayNight {
    Thirty,  // 30%
    Seventy, // 70%
    #[default]
    Full, // 100%
}

impl DayNight {
    pub const ALL: [DayNight; 3] = [DayNight::Thirty, DayNight::Seventy, DayNight::Full];

    pub fn label(&self) -> &'static str {
        match self {
            DayNight::Thirty => "30%",
            DayNight::Seventy => "70%",
            DayNight::Full => "100%",
        }
    }

    /// Stored label → enum. Only the exact printed labels are recognised.
    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.label() == s.trim())
    }

    /// Helper for CLI input: accepts `30`, `30%`, ` 70 % `, ...
    pub fn from_input(s: &str) -> Option<Self> {
        let digits: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let digits = digits.trim_end_matches('%');
        Self::ALL
            .into_iter()
            .find(|d| d.label().trim_end_matches('%') == digits)
    }
}
