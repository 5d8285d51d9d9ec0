//! A game state bundled with its randomness and currency store.
//!
//! The free functions in [`super::logic`] work on any `GameState`; a
//! `Session` calls them and writes the glitchbytes balance back to its
//! store whenever a command changed it.

use super::logic::{self, PullOutcome};
use super::state::GameState;
use crate::core::config::GameConfig;
use crate::core::error::GameResult;
use crate::orbs::OrbType;
use crate::persistence::{load_persistent_currency, save_persistent_currency, KeyValueStore};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct Session<R, S> {
    state: GameState,
    rng: R,
    store: S,
}

impl<S: KeyValueStore> Session<StdRng, S> {
    pub fn with_entropy(config: GameConfig, store: S) -> Self {
        Self::new(config, StdRng::from_entropy(), store)
    }
}

impl<R: Rng, S: KeyValueStore> Session<R, S> {
    /// New session in the menu, with the balance read from `store`.
    pub fn new(config: GameConfig, rng: R, store: S) -> Self {
        let glitchbytes = load_persistent_currency(&store, config.initial_glitchbytes);
        Self {
            state: GameState::new(config, glitchbytes),
            rng,
            store,
        }
    }

    /// Resumes a saved state.
    pub fn from_state(state: GameState, rng: R, store: S) -> Self {
        Self { state, rng, store }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    fn run<T>(&mut self, command: impl FnOnce(&mut GameState, &mut R) -> GameResult<T>) -> GameResult<T> {
        let before = self.state.player_stats.glitchbytes;
        let result = command(&mut self.state, &mut self.rng);
        let after = self.state.player_stats.glitchbytes;
        if after != before {
            save_persistent_currency(&mut self.store, after);
        }
        result
    }

    pub fn start_new_game(&mut self) -> GameResult<()> {
        self.run(|state, _| logic::start_new_game(state))
    }

    pub fn enter_level(&mut self, level: u32) -> GameResult<()> {
        self.run(|state, _| logic::enter_level(state, level))
    }

    pub fn pull_orb(&mut self) -> GameResult<PullOutcome> {
        self.run(logic::pull_orb)
    }

    pub fn complete_level(&mut self) -> GameResult<()> {
        self.run(|state, _| logic::complete_level(state))
    }

    pub fn continue_to_marketplace(&mut self) -> GameResult<()> {
        self.run(logic::continue_to_marketplace)
    }

    pub fn purchase_orb(&mut self, orb_type: OrbType, quantity: u32) -> GameResult<u64> {
        self.run(|state, _| logic::purchase_orb(state, orb_type, quantity))
    }

    pub fn purchase_shop_item(&mut self, item_id: &str, quantity: u32) -> GameResult<u64> {
        self.run(|state, _| logic::purchase_shop_item(state, item_id, quantity))
    }

    pub fn proceed_to_next_level(&mut self) -> GameResult<()> {
        self.run(|state, _| logic::proceed_to_next_level(state))
    }

    pub fn cash_out_mid_level(&mut self) -> GameResult<u64> {
        self.run(|state, _| logic::cash_out_mid_level(state))
    }

    pub fn cash_out_post_level(&mut self) -> GameResult<u64> {
        self.run(|state, _| logic::cash_out_post_level(state))
    }

    pub fn return_to_menu(&mut self) -> GameResult<()> {
        self.run(|state, _| logic::return_to_menu(state))
    }

    pub fn restart_game(&mut self) -> GameResult<()> {
        self.run(|state, _| logic::restart_game(state))
    }

    pub fn skip_level(&mut self) -> GameResult<u64> {
        self.run(|state, _| logic::skip_level(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::GLITCHBYTES_STORE_KEY;
    use crate::game::GamePhase;
    use crate::persistence::MemoryStore;
    use rand_chacha::ChaCha8Rng;

    fn session(store: MemoryStore) -> Session<ChaCha8Rng, MemoryStore> {
        Session::new(GameConfig::default(), ChaCha8Rng::seed_from_u64(11), store)
    }

    #[test]
    fn test_new_session_reads_stored_balance() {
        let mut store = MemoryStore::new();
        store.set(GLITCHBYTES_STORE_KEY, "321").unwrap();
        let session = session(store);
        assert_eq!(session.state().player_stats.glitchbytes, 321);
    }

    #[test]
    fn test_level_entry_is_persisted() {
        let mut session = session(MemoryStore::new());
        session.start_new_game().unwrap();
        assert_eq!(
            session.store().get(GLITCHBYTES_STORE_KEY).unwrap().as_deref(),
            Some("990")
        );
    }

    #[test]
    fn test_failed_command_writes_nothing() {
        let mut session = session(MemoryStore::new());
        assert!(session.pull_orb().is_err());
        assert_eq!(session.store().get(GLITCHBYTES_STORE_KEY).unwrap(), None);
    }

    #[test]
    fn test_cash_out_persists_balance() {
        let mut state = GameState::default();
        logic::start_new_game(&mut state).unwrap();
        state.orb_bag = crate::orbs::OrbBag::empty();
        state.orb_bag.add_orbs(OrbType::Point, 2, 5.0);
        let mut session = Session::from_state(state, ChaCha8Rng::seed_from_u64(11), MemoryStore::new());

        session.pull_orb().unwrap();
        assert_eq!(session.state().phase, GamePhase::Level);
        assert_eq!(session.cash_out_mid_level(), Ok(5));
        assert_eq!(session.state().phase, GamePhase::Menu);
        assert_eq!(
            session.store().get(GLITCHBYTES_STORE_KEY).unwrap().as_deref(),
            Some("995")
        );
    }
}
