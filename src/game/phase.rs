use serde::{Deserialize, Serialize};

/// Where the session is in the menu -> level -> marketplace loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Menu,
    Level,
    /// Milestone reached; the player chooses between cashing out and the marketplace.
    Confirmation,
    Marketplace,
    #[serde(rename = "gameover")]
    GameOver,
    Victory,
}

impl GamePhase {
    pub const ALL: [GamePhase; 6] = [
        GamePhase::Menu,
        GamePhase::Level,
        GamePhase::Confirmation,
        GamePhase::Marketplace,
        GamePhase::GameOver,
        GamePhase::Victory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "menu",
            GamePhase::Level => "level",
            GamePhase::Confirmation => "confirmation",
            GamePhase::Marketplace => "marketplace",
            GamePhase::GameOver => "gameover",
            GamePhase::Victory => "victory",
        }
    }

    /// The legal transition table.
    pub fn can_transition_to(&self, next: GamePhase) -> bool {
        use GamePhase::*;
        matches!(
            (self, next),
            (Menu, Level)
                | (Level, Confirmation)
                | (Level, GameOver)
                | (Level, Victory)
                | (Level, Menu)
                | (Confirmation, Marketplace)
                | (Confirmation, Menu)
                | (Marketplace, Level)
                | (Marketplace, Menu)
                | (GameOver, Menu)
                | (Victory, Menu)
        )
    }

    /// Whether the session has ended and only a return to the menu remains.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
