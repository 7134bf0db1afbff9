use serde::{Deserialize, Serialize};

/// Identity and payroll data printed in the header of every page.
/// All fields are free text; blank fields print blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub designation: String,
    pub station: String,
    pub pay_level: String,
    pub basic_pay: String,
    pub pf_number: String,
    pub headquarters: String,
    pub branch: String,
    pub division: String,
}

impl UserProfile {
    pub fn display_name(&self) -> String {
        if self.name.trim().is_empty() {
            format!("Profile #{}", self.id)
        } else if self.designation.trim().is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.designation)
        }
    }
}
