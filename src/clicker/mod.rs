//! Button Clicker: a one-button incremental game.

pub mod actions;
pub mod catalog;
pub mod logic;
pub mod multiplier;
pub mod pricing;
pub mod production;
pub mod save;
pub mod state;
pub mod store;
pub mod view;

mod simulator;

use crate::click::ClickRateSampler;
use crate::number::Num;
use crate::time::GameTime;

use actions::Action;
use catalog::{Catalog, Channel};
use state::ProgressionState;
use store::SaveStore;

/// Signals for the presentation layer, collected until drained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// A terminal bonus was bought.
    GameComplete { bonus_id: String },
}

/// A running game: progression state plus the clocks and save store that
/// drive it.
///
/// Every applied action is written through to the store. The passive
/// ticker only runs while production is non-zero.
pub struct ClickerGame<S: SaveStore> {
    state: ProgressionState,
    catalog: Catalog,
    store: S,
    clock: GameTime,
    clicks: ClickRateSampler,
    producing: bool,
    events: Vec<GameEvent>,
}

impl<S: SaveStore> ClickerGame<S> {
    /// Start from whatever `store` holds, or a new game.
    pub fn new(catalog: Catalog, mut store: S) -> Self {
        let state = save::load_game(&mut store);
        let mut game = Self {
            state,
            catalog,
            store,
            clock: GameTime::new(logic::TICKS_PER_SECOND),
            clicks: ClickRateSampler::new(),
            producing: false,
            events: Vec::new(),
        };
        game.sync_ticker();
        game
    }

    /// [`new`](Self::new) with the catalog shipped in `data/`.
    pub fn bundled(store: S) -> Self {
        Self::new(Catalog::bundled(), store)
    }

    /// Apply one player action. Returns whether it changed anything.
    pub fn handle(&mut self, action: &Action, now_ms: f64) -> bool {
        let applied = match action {
            Action::Click => {
                logic::click(&mut self.state, &self.catalog);
                self.clicks.record(now_ms);
                true
            }
            Action::ClaimAdBonus => {
                logic::claim_ad_bonus(&mut self.state, &self.catalog);
                true
            }
            Action::BuyUpgrade { id, quantity } => {
                logic::buy_upgrade(&mut self.state, &self.catalog, id, *quantity)
            }
            Action::BuySkin(id) => logic::buy_skin(&mut self.state, &self.catalog, id),
            Action::EquipSkin(id) => logic::equip_skin(&mut self.state, &self.catalog, id),
            Action::BuyTier { bonus_id, level } => {
                let bought = logic::buy_tier(&mut self.state, &self.catalog, bonus_id, *level);
                if bought && self.is_terminal(bonus_id) {
                    log::info!("Button Clicker: game complete ({bonus_id})");
                    self.events.push(GameEvent::GameComplete {
                        bonus_id: bonus_id.clone(),
                    });
                }
                bought
            }
            Action::Reset => {
                logic::reset(&mut self.state);
                save::delete_save(&mut self.store);
                self.sync_ticker();
                return true;
            }
        };

        if applied {
            save::save_game(&mut self.store, &self.state);
            self.sync_ticker();
        }
        applied
    }

    /// Advance the clocks to `now_ms`. Returns the number of passive ticks
    /// applied.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        self.clicks.update(now_ms);
        if !self.producing {
            return 0;
        }
        let ticks = self.clock.update(now_ms);
        if ticks > 0 {
            logic::tick(&mut self.state, &self.catalog, ticks);
            save::save_game(&mut self.store, &self.state);
        }
        ticks
    }

    /// Start or stop the passive ticker when production crosses zero.
    fn sync_ticker(&mut self) {
        let producing = !self.passive_rate().is_zero();
        if producing == self.producing {
            return;
        }
        if producing {
            log::debug!("Button Clicker: passive tick started");
        } else {
            self.clock.pause();
            log::debug!("Button Clicker: passive tick stopped");
        }
        self.producing = producing;
    }

    fn is_terminal(&self, bonus_id: &str) -> bool {
        self.catalog
            .tier(bonus_id)
            .is_some_and(|b| b.channel == Channel::Terminal)
    }

    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn score(&self) -> Num {
        self.state.score
    }

    pub fn passive_rate(&self) -> Num {
        logic::passive_rate(&self.state, &self.catalog)
    }

    pub fn manual_value(&self) -> Num {
        logic::manual_value(&self.state, &self.catalog)
    }

    pub fn ad_bonus_amount(&self) -> Num {
        logic::ad_bonus_amount(&self.state, &self.catalog)
    }

    /// Clicks in the last second, as of the latest sample.
    pub fn click_rate(&self) -> u32 {
        self.clicks.rate()
    }

    pub fn is_producing(&self) -> bool {
        self.producing
    }

    pub fn is_complete(&self) -> bool {
        logic::is_complete(&self.state, &self.catalog)
    }

    pub fn upgrade_views(&self) -> Vec<view::UpgradeView> {
        view::upgrade_views(&self.state, &self.catalog)
    }

    pub fn skin_views(&self) -> Vec<view::SkinView> {
        view::skin_views(&self.state, &self.catalog)
    }

    pub fn tier_offers(&self) -> Vec<view::TierOffer> {
        view::tier_offers(&self.state, &self.catalog)
    }

    /// Take all events raised since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryStore;

    fn game() -> (ClickerGame<MemoryStore>, MemoryStore) {
        let store = MemoryStore::new();
        (ClickerGame::bundled(store.clone()), store)
    }

    #[test]
    fn new_game_is_idle() {
        let (game, store) = game();
        assert!(game.score().is_zero());
        assert!(!game.is_producing());
        assert!(store.contents().is_none());
    }

    #[test]
    fn click_via_action_is_persisted() {
        let (mut game, store) = game();
        assert!(game.handle(&Action::Click, 0.0));
        assert_eq!(game.score(), Num::ONE);
        let saved = save::decode(&store.contents().unwrap()).unwrap();
        assert_eq!(saved.score, Num::ONE);
    }

    #[test]
    fn rejected_action_is_not_persisted() {
        let (mut game, store) = game();
        assert!(!game.handle(&Action::buy_one("intern"), 0.0));
        assert!(store.contents().is_none());
    }

    #[test]
    fn first_upgrade_starts_the_ticker() {
        let (mut game, store) = game();
        game.state.score = Num::from_f64(100.0);
        assert!(game.handle(&Action::buy_one("intern"), 0.0));
        assert!(game.is_producing());

        assert_eq!(game.update(0.0), 0);
        assert_eq!(game.update(300.0), 3);
        // 1/s for 0.3s
        assert!((game.score().to_f64() - 0.3).abs() < 1e-9);
        let saved = save::decode(&store.contents().unwrap()).unwrap();
        assert_eq!(saved.score, game.score());
    }

    #[test]
    fn idle_game_does_not_tick() {
        let (mut game, _) = game();
        game.update(0.0);
        assert_eq!(game.update(1_000.0), 0);
        assert!(game.score().is_zero());
    }

    #[test]
    fn reset_stops_the_ticker_and_clears_the_store() {
        let (mut game, store) = game();
        game.state.score = Num::from_f64(100.0);
        game.handle(&Action::buy_one("intern"), 0.0);
        assert!(store.contents().is_some());

        assert!(game.handle(&Action::Reset, 10.0));
        assert!(!game.is_producing());
        assert_eq!(game.state(), &ProgressionState::new());
        assert!(store.contents().is_none());
    }

    #[test]
    fn terminal_purchase_emits_game_complete_once() {
        let (mut game, _) = game();
        game.state.score = Num::from_f64(1e13);
        let buy = Action::BuyTier {
            bonus_id: "endgame_upgrade".into(),
            level: 1,
        };
        assert!(game.handle(&buy, 0.0));
        assert!(game.is_complete());
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::GameComplete {
                bonus_id: "endgame_upgrade".into()
            }]
        );
        assert!(!game.handle(&buy, 0.0));
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn other_tiers_emit_nothing() {
        let (mut game, _) = game();
        game.state.score = Num::from_f64(1_000.0);
        assert!(game.handle(
            &Action::BuyTier {
                bonus_id: "power_click".into(),
                level: 1
            },
            0.0
        ));
        assert!(game.drain_events().is_empty());
        assert_eq!(game.manual_value(), Num::from_f64(2.0));
    }

    #[test]
    fn click_rate_follows_clicks() {
        let (mut game, _) = game();
        game.update(0.0);
        for t in [10.0, 20.0, 30.0] {
            game.handle(&Action::Click, t);
        }
        game.update(100.0);
        assert_eq!(game.click_rate(), 3);
    }

    #[test]
    fn reload_resumes_production() {
        let store = MemoryStore::new();
        {
            let mut game = ClickerGame::bundled(store.clone());
            game.state.score = Num::from_f64(15.0);
            assert!(game.handle(&Action::buy_one("auto_clicker"), 0.0));
        }
        let game = ClickerGame::bundled(store);
        assert_eq!(game.state().owned("auto_clicker"), 1);
        assert!(game.is_producing());
    }
}
