// Session start
pub const INITIAL_GLITCHBYTES: u64 = 1000;
pub const MAX_HEALTH: u32 = 5;
pub const BASE_LEVEL_MULTIPLIER: f64 = 1.0;

// Levels (1-based, index 0 = level 1)
pub const LEVEL_COUNT: u32 = 7;
pub const LEVEL_MILESTONES: [u64; 7] = [12, 18, 28, 44, 70, 100, 150];
pub const LEVEL_COSTS: [u64; 7] = [10, 1, 2, 4, 6, 9, 13];

// Marketplace flat orb prices (bits)
pub const HEALTH_ORB_COST: u64 = 2;
pub const POINT_ORB_COST: u64 = 2;

// Default orb amounts when a purchase does not specify one
pub const DEFAULT_HEALTH_AMOUNT: f64 = 1.0;
pub const DEFAULT_POINT_AMOUNT: f64 = 5.0;
pub const DEFAULT_BOMB_AMOUNT: f64 = 2.0;
pub const DEFAULT_POINTS_PER_ANYORB_AMOUNT: f64 = 1.0;
pub const DEFAULT_POINTS_PER_BOMBPULLED_AMOUNT: f64 = 1.0;
pub const DEFAULT_MULTIPLIER_AMOUNT: f64 = 0.5;
pub const DEFAULT_BITS_AMOUNT: f64 = 10.0;
pub const DEFAULT_GLITCHBYTES_AMOUNT: f64 = 5.0;

// Starting bag: bomb tiers 1/1/2/3, three 5-point orbs, one of each combo
pub const STARTING_BOMBS: [f64; 4] = [1.0, 1.0, 2.0, 3.0];
pub const STARTING_POINTS: [f64; 3] = [5.0, 5.0, 5.0];
pub const STARTING_HEALTH: [f64; 1] = [1.0];
pub const STARTING_POINTS_PER_ANYORB: [f64; 1] = [1.0];
pub const STARTING_POINTS_PER_BOMBPULLED: [f64; 1] = [4.0];
pub const STARTING_MULTIPLIER: [f64; 1] = [1.0];

// Shop deck
pub const DECK_PRICE_GROWTH: f64 = 1.2;
pub const COMMON_OFFER_SLOTS: usize = 3;
pub const RARE_OFFER_SLOTS: usize = 2;
pub const COSMIC_OFFER_SLOTS: usize = 1;

// Playground
pub const PLAYGROUND_LOG_LIMIT: usize = 20;
pub const PLAYGROUND_GLITCHBYTES: u64 = 500;
pub const PLAYGROUND_COMBO_AMOUNT: f64 = 2.0;
pub const PLAYGROUND_DANGER_AMOUNT: f64 = 3.0;

// Persistence
pub const GLITCHBYTES_STORE_KEY: &str = "glitch_bomb_glitchbytes";
pub const SAVE_VERSION_MAGIC: u64 = 0x4742_4F4D_4200_0001;
