//! Push-notification payload for stock alerts.

use serde::{Deserialize, Serialize};

/// Payload carried by a stock push notification.
///
/// Every field takes the shell's default when missing, so a bare push still
/// renders a usable notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAlert {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_body")]
    pub body: String,
    /// Where a tap on the notification navigates.
    #[serde(default = "default_url")]
    pub url: String,
}

impl StockAlert {
    /// Notification icon.
    pub const ICON: &'static str = "/icons/icon-192.png";
    /// Badge glyph for the notification tray.
    pub const BADGE: &'static str = "/icons/icon-192.png";
    /// Tag collapsing repeated alerts into a single notification.
    pub const TAG: &'static str = "stock-alert";
}

impl Default for StockAlert {
    fn default() -> Self {
        Self {
            title: default_title(),
            body: default_body(),
            url: default_url(),
        }
    }
}

fn default_title() -> String {
    "Stock Alert".to_string()
}

fn default_body() -> String {
    "Check your inventory".to_string()
}

fn default_url() -> String {
    "/".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_takes_defaults() {
        let alert: StockAlert = serde_json::from_str("{}").unwrap();
        assert_eq!(alert, StockAlert::default());
        assert_eq!(alert.title, "Stock Alert");
        assert_eq!(alert.url, "/");
    }

    #[test]
    fn explicit_fields_win_over_defaults() {
        let alert: StockAlert = serde_json::from_str(
            r#"{"title":"Low stock","body":"f1 TL below 10","url":"/inventory"}"#,
        )
        .unwrap();
        assert_eq!(alert.title, "Low stock");
        assert_eq!(alert.body, "f1 TL below 10");
        assert_eq!(alert.url, "/inventory");
    }
}
