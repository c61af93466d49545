//! Card-level renewal dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::CardId;

/// Annual-fee renewal of a card in the user's collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRenewal {
    pub card_id: CardId,
    pub card_name: String,
    pub renewal_date: NaiveDate,

    /// Annual fee charged on renewal, in cents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_fee: Option<u64>,
}

impl CardRenewal {
    pub fn new(card_id: CardId, card_name: impl Into<String>, renewal_date: NaiveDate) -> Self {
        Self {
            card_id,
            card_name: card_name.into(),
            renewal_date,
            annual_fee: None,
        }
    }

    pub fn with_annual_fee(mut self, cents: u64) -> Self {
        self.annual_fee = Some(cents);
        self
    }
}
