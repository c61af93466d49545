//! Navigation module - deep links inside notifications and the router that
//! resolves them on delivery.

mod deep_link;
mod router;

pub use deep_link::{
    DeepLink, ALLOWED_PARAMS, CARD_ID_PARAM, DASHBOARD_SCREEN, INSIGHTS_SCREEN,
    SHOW_RENEWAL_INFO_PARAM,
};
pub use router::{
    DiscardReason, NavigationIntent, NotificationRouter, RouteOutcome, RouteParams, RouterState,
};
