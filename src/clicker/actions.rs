//! Player actions a presentation layer dispatches into [`ClickerGame::handle`].
//!
//! [`ClickerGame::handle`]: super::ClickerGame::handle

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    // ── Core ────────────────────────────────────────────────────────
    Click,
    ClaimAdBonus,

    // ── Shop ────────────────────────────────────────────────────────
    /// Buy `quantity` units of a production upgrade.
    BuyUpgrade { id: String, quantity: u64 },
    BuySkin(String),
    EquipSkin(String),
    BuyTier { bonus_id: String, level: u32 },

    // ── Progress ────────────────────────────────────────────────────
    Reset,
}

impl Action {
    /// Single-unit upgrade purchase.
    pub fn buy_one(id: impl Into<String>) -> Self {
        Action::BuyUpgrade {
            id: id.into(),
            quantity: 1,
        }
    }
}
