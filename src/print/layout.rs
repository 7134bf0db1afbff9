//! Fixed layout of the TA journal paper form: column catalogue and the
//! printed wording. Column order and numbering follow the regulated form.

use crate::config::Config;

pub struct Column {
    pub number: u8,
    pub label: &'static str,
    pub hindi: &'static str,
    /// Share of the table width, in percent.
    pub weight: f32,
}

pub const COLUMNS: [Column; 12] = [
    Column { number: 1, label: "Date", hindi: "माह और तारीख", weight: 8.0 },
    Column { number: 2, label: "Train No.", hindi: "गाड़ी का क्रमांक", weight: 6.0 },
    Column { number: 3, label: "Departure time", hindi: "प्रस्थान समय", weight: 6.0 },
    Column { number: 4, label: "Arrival time", hindi: "आगमन समय", weight: 6.0 },
    Column { number: 5, label: "From station", hindi: "से", weight: 6.0 },
    Column { number: 6, label: "To station", hindi: "तक", weight: 6.0 },
    Column { number: 7, label: "Kms", hindi: "कि. मी.", weight: 6.0 },
    Column { number: 8, label: "Day/Night %", hindi: "दिन/रात", weight: 6.0 },
    Column { number: 9, label: "Purpose", hindi: "यात्रा का उद्देश्य", weight: 20.0 },
    Column { number: 10, label: "Rate", hindi: "दर", weight: 6.0 },
    Column { number: 11, label: "Conveyance distance", hindi: "दूरी (प्राइवेट/सार्वजनिक)", weight: 12.0 },
    Column { number: 12, label: "Reference", hindi: "दूरी-अनुसूची संदर्भ", weight: 12.0 },
];

/// Index of the Rate column; the totals row prints the amount under it.
pub const RATE_COLUMN: usize = 9;

pub const TITLE: &str = "TRAVELLING ALLOWANCE JOURNAL";
pub const TITLE_HINDI: &str = "यात्रा भत्ता जर्नल";

pub const CERTIFICATION: [&str; 2] = [
    "I hereby certify that the above mentioned ........................ was absent on duty \
     from his headquarter's station during the period charged for in this bill.",
    "I certify that no TA/DA or any other remuneration has been drawn from any other source \
     in respect of the journeys performed duty pass and also for the halts for which TA/DA \
     has been claimed in this bill.",
];

pub const CERTIFICATION_HINDI: &str = "मैं प्रमाणित करता हूं कि उपर्युक्त ........................ \
     उस अवधि के दौरान, जिसके लिये इस बिल में भत्ता मांगा गया है रेलवे के कार्य से ड्यूटी पर \
     मुख्यालय स्टेशन से बाहर गया था ।";

/// Signature blocks, left to right: (title line, caption).
pub const SIGNATURES: [(&str, &str); 3] = [
    ("Countersigned", "Station / Station Master"),
    ("Controlling Officer", ""),
    ("Signature of Officer", "Claiming T.A."),
];

/// Site-specific wording printed in the page header.
#[derive(Debug, Clone)]
pub struct FormSettings {
    pub railway: String,
    pub governing_rule: String,
    pub form_code: String,
    /// TrueType file with Devanagari glyphs for the PDF labels.
    pub hindi_font: Option<String>,
}

impl From<&Config> for FormSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            railway: cfg.railway.clone(),
            governing_rule: cfg.governing_rule.clone(),
            form_code: cfg.form_code.clone(),
            hindi_font: cfg.hindi_font.clone(),
        }
    }
}
