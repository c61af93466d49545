//! Notification router.
//!
//! Turns a delivered notification payload into at most one navigation
//! intent. Malformed or foreign payloads (another SDK's background ping, a
//! truncated redelivery) are discarded without side effects.
//!
//! The router does not deduplicate: a redelivered payload yields the same
//! intent again, and the navigation layer is expected to treat re-navigating
//! to the current target as a no-op.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::deep_link::{ALLOWED_PARAMS, CARD_ID_PARAM, SHOW_RENEWAL_INFO_PARAM};
use crate::domain::foundation::StateMachine;

/// Router lifecycle per delivery event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouterState {
    #[default]
    Idle,
    Routing,
}

impl StateMachine for RouterState {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (RouterState::Idle, RouterState::Routing) | (RouterState::Routing, RouterState::Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            RouterState::Idle => vec![RouterState::Routing],
            RouterState::Routing => vec![RouterState::Idle],
        }
    }
}

/// Whitelisted route parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_renewal_info: Option<String>,
}

/// Where the app should navigate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationIntent {
    pub pathname: String,
    pub params: RouteParams,
}

/// Why a payload produced no navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    MissingData,
    ScreenNotString,
    ParamsNotObject,
}

impl fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiscardReason::MissingData => "payload has no request.content.data object",
            DiscardReason::ScreenNotString => "data.screen is missing or not a string",
            DiscardReason::ParamsNotObject => "data.params is missing or not an object",
        };
        write!(f, "{}", s)
    }
}

/// Result of routing one delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    Navigate(NavigationIntent),
    Discarded(DiscardReason),
}

/// Validates delivered payloads and resolves them to navigation intents.
#[derive(Debug, Default)]
pub struct NotificationRouter {
    state: RouterState,
}

impl NotificationRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RouterState {
        self.state
    }

    /// Routes one delivered payload. Always returns to `Idle`.
    pub fn route(&mut self, raw: &Value) -> RouteOutcome {
        self.enter(RouterState::Routing);
        let outcome = match resolve(raw) {
            Ok(intent) => RouteOutcome::Navigate(intent),
            Err(reason) => {
                tracing::debug!(%reason, "Discarding notification payload");
                RouteOutcome::Discarded(reason)
            }
        };
        self.enter(RouterState::Idle);
        outcome
    }

    fn enter(&mut self, target: RouterState) {
        // Routing is synchronous, so the only way to observe a non-Idle state
        // here is a previous call that unwound; recover to the target.
        self.state = self.state.transition_to(target).unwrap_or(target);
    }
}

fn resolve(raw: &Value) -> Result<NavigationIntent, DiscardReason> {
    let data = raw
        .pointer("/request/content/data")
        .and_then(Value::as_object)
        .ok_or(DiscardReason::MissingData)?;

    let screen = data
        .get("screen")
        .and_then(Value::as_str)
        .ok_or(DiscardReason::ScreenNotString)?;

    let params = data
        .get("params")
        .and_then(Value::as_object)
        .ok_or(DiscardReason::ParamsNotObject)?;

    for dropped in params.keys().filter(|k| !ALLOWED_PARAMS.contains(&k.as_str())) {
        tracing::debug!(param = %dropped, "Dropping non-whitelisted route param");
    }

    let string_param = |name: &str| params.get(name).and_then(Value::as_str).map(str::to_string);

    Ok(NavigationIntent {
        pathname: screen.to_string(),
        params: RouteParams {
            card_id: string_param(CARD_ID_PARAM),
            show_renewal_info: string_param(SHOW_RENEWAL_INFO_PARAM),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(data: Value) -> Value {
        json!({ "request": { "content": { "data": data } } })
    }

    #[test]
    fn routes_insights_payload_with_card_id() {
        let mut router = NotificationRouter::new();
        let raw = payload(json!({
            "screen": "/(tabs)/03-insights",
            "params": { "cardId": "abc" }
        }));

        let outcome = router.route(&raw);

        assert_eq!(
            outcome,
            RouteOutcome::Navigate(NavigationIntent {
                pathname: "/(tabs)/03-insights".to_string(),
                params: RouteParams {
                    card_id: Some("abc".to_string()),
                    show_renewal_info: None,
                },
            })
        );
        assert_eq!(router.state(), RouterState::Idle);
    }

    #[test]
    fn missing_params_is_discarded() {
        let mut router = NotificationRouter::new();
        let raw = payload(json!({ "screen": "/(tabs)/03-insights" }));

        assert_eq!(
            router.route(&raw),
            RouteOutcome::Discarded(DiscardReason::ParamsNotObject)
        );
        assert_eq!(router.state(), RouterState::Idle);
    }

    #[test]
    fn non_string_screen_is_discarded() {
        let mut router = NotificationRouter::new();
        let raw = payload(json!({ "screen": 3, "params": {} }));

        assert_eq!(
            router.route(&raw),
            RouteOutcome::Discarded(DiscardReason::ScreenNotString)
        );
    }

    #[test]
    fn params_array_is_discarded() {
        let mut router = NotificationRouter::new();
        let raw = payload(json!({ "screen": "/x", "params": ["cardId"] }));

        assert_eq!(
            router.route(&raw),
            RouteOutcome::Discarded(DiscardReason::ParamsNotObject)
        );
    }

    #[test]
    fn foreign_payloads_are_inert() {
        let mut router = NotificationRouter::new();

        for raw in [
            json!(null),
            json!("ping"),
            json!({ "type": "background-sync" }),
            json!({ "request": { "content": { "data": "x" } } }),
        ] {
            assert_eq!(
                router.route(&raw),
                RouteOutcome::Discarded(DiscardReason::MissingData)
            );
        }
    }

    #[test]
    fn unknown_params_are_dropped() {
        let mut router = NotificationRouter::new();
        let raw = payload(json!({
            "screen": "/(tabs)/03-insights",
            "params": {
                "cardId": "abc",
                "showRenewalInfo": "true",
                "redirect": "https://evil.example",
                "admin": "1"
            }
        }));

        let RouteOutcome::Navigate(intent) = router.route(&raw) else {
            panic!("expected navigation");
        };
        assert_eq!(intent.params.card_id.as_deref(), Some("abc"));
        assert_eq!(intent.params.show_renewal_info.as_deref(), Some("true"));

        let serialized = serde_json::to_value(&intent).unwrap();
        assert!(serialized["params"].get("redirect").is_none());
    }

    #[test]
    fn non_string_whitelisted_param_is_dropped() {
        let mut router = NotificationRouter::new();
        let raw = payload(json!({ "screen": "/x", "params": { "cardId": 42 } }));

        let RouteOutcome::Navigate(intent) = router.route(&raw) else {
            panic!("expected navigation");
        };
        assert_eq!(intent.params.card_id, None);
    }

    #[test]
    fn absent_params_are_omitted_from_intent() {
        let mut router = NotificationRouter::new();
        let raw = payload(json!({ "screen": "/(tabs)/01-dashboard", "params": { "cardId": "abc" } }));

        let RouteOutcome::Navigate(intent) = router.route(&raw) else {
            panic!("expected navigation");
        };
        let serialized = serde_json::to_value(&intent).unwrap();

        assert_eq!(serialized["params"], json!({ "cardId": "abc" }));
        assert!(serialized["params"].get("showRenewalInfo").is_none());
    }

    #[test]
    fn redelivery_routes_again() {
        let mut router = NotificationRouter::new();
        let raw = payload(json!({ "screen": "/x", "params": {} }));

        let first = router.route(&raw);
        let second = router.route(&raw);

        assert_eq!(first, second);
        assert!(matches!(first, RouteOutcome::Navigate(_)));
    }
}
