//! Deep-link payload carried inside scheduled notifications.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Dashboard tab, target of perk reminders.
pub const DASHBOARD_SCREEN: &str = "/(tabs)/01-dashboard";

/// Insights tab, target of card renewal reminders.
pub const INSIGHTS_SCREEN: &str = "/(tabs)/03-insights";

pub const CARD_ID_PARAM: &str = "cardId";
pub const SHOW_RENEWAL_INFO_PARAM: &str = "showRenewalInfo";

/// Route parameters the router forwards to the navigation layer.
///
/// Any key not listed here is dropped on delivery.
pub const ALLOWED_PARAMS: [&str; 2] = [CARD_ID_PARAM, SHOW_RENEWAL_INFO_PARAM];

/// The `data` object of a notification: `{ screen, params }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeepLink {
    pub screen: String,
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl DeepLink {
    pub fn new(screen: impl Into<String>) -> Self {
        Self {
            screen: screen.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Wraps the link in the envelope the platform delivers:
    /// `{ request: { content: { data } } }`.
    pub fn to_delivered_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "request": {
                "content": {
                    "data": {
                        "screen": self.screen,
                        "params": self.params,
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivered_payload_nests_data() {
        let link = DeepLink::new(INSIGHTS_SCREEN).with_param(CARD_ID_PARAM, "abc");
        let payload = link.to_delivered_payload();

        assert_eq!(payload["request"]["content"]["data"]["screen"], INSIGHTS_SCREEN);
        assert_eq!(payload["request"]["content"]["data"]["params"]["cardId"], "abc");
    }
}
