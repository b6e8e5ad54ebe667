use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stockbook_core::DomainError;

/// Stock-holding location within the workshop.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Department {
    Tl,
    Swatches,
}

impl Department {
    /// All known departments, in display order.
    pub const ALL: [Department; 2] = [Department::Tl, Department::Swatches];

    /// Wire/display name ("TL", "SWATCHES").
    pub fn as_str(self) -> &'static str {
        match self {
            Department::Tl => "TL",
            Department::Swatches => "SWATCHES",
        }
    }
}

impl core::fmt::Display for Department {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TL" => Ok(Department::Tl),
            "SWATCHES" => Ok(Department::Swatches),
            other => Err(DomainError::validation(format!(
                "unknown department: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_wire_names() {
        assert_eq!(serde_json::to_string(&Department::Tl).unwrap(), "\"TL\"");
        assert_eq!(
            serde_json::to_string(&Department::Swatches).unwrap(),
            "\"SWATCHES\""
        );
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("TL".parse::<Department>().unwrap(), Department::Tl);
        assert_eq!(
            "swatches".parse::<Department>().unwrap(),
            Department::Swatches
        );
        assert!("WAREHOUSE".parse::<Department>().is_err());
    }
}
