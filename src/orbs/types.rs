use serde::{Deserialize, Serialize};

/// Every orb category a bag can hold. Declaration order is the draw-walk order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrbType {
    Health,
    Point,
    Bomb,
    PointsPerAnyorb,
    PointsPerBombpulled,
    Multiplier,
    Bits,
    Glitchbytes,
}

impl OrbType {
    pub const ALL: [OrbType; 8] = [
        OrbType::Health,
        OrbType::Point,
        OrbType::Bomb,
        OrbType::PointsPerAnyorb,
        OrbType::PointsPerBombpulled,
        OrbType::Multiplier,
        OrbType::Bits,
        OrbType::Glitchbytes,
    ];

    /// Wire/log tag, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrbType::Health => "health",
            OrbType::Point => "point",
            OrbType::Bomb => "bomb",
            OrbType::PointsPerAnyorb => "points_per_anyorb",
            OrbType::PointsPerBombpulled => "points_per_bombpulled",
            OrbType::Multiplier => "multiplier",
            OrbType::Bits => "bits",
            OrbType::Glitchbytes => "glitchbytes",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrbType::Health => "Health Orb",
            OrbType::Point => "Point Orb",
            OrbType::Bomb => "Bomb Orb",
            OrbType::PointsPerAnyorb => "Combo Orb",
            OrbType::PointsPerBombpulled => "Danger Orb",
            OrbType::Multiplier => "Multiplier Orb",
            OrbType::Bits => "Bits Orb",
            OrbType::Glitchbytes => "Glitchbyte Orb",
        }
    }

    /// Bombs can never be bought directly in the marketplace.
    pub fn is_purchasable(&self) -> bool {
        !matches!(self, OrbType::Bomb)
    }

    /// Combo orbs score from bag contents or run history instead of a fixed amount.
    pub fn is_combo(&self) -> bool {
        matches!(self, OrbType::PointsPerAnyorb | OrbType::PointsPerBombpulled)
    }
}

impl std::fmt::Display for OrbType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single drawable orb instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orb {
    pub orb_type: OrbType,
    pub amount: f64,
}

impl Orb {
    pub fn new(orb_type: OrbType, amount: f64) -> Self {
        Self { orb_type, amount }
    }

    /// Amount as a whole number, for effects on integer stats.
    /// Negative and fractional parts are dropped.
    pub fn whole_amount(&self) -> u64 {
        if self.amount.is_finite() && self.amount > 0.0 {
            self.amount.floor() as u64
        } else {
            0
        }
    }

    /// Short label such as "B:3" or "M:0.5".
    pub fn label(&self) -> String {
        let initial = match self.orb_type {
            OrbType::Health => "H",
            OrbType::Point => "P",
            OrbType::Bomb => "B",
            OrbType::PointsPerAnyorb => "P/O",
            OrbType::PointsPerBombpulled => "P/B",
            OrbType::Multiplier => "M",
            OrbType::Bits => "BT",
            OrbType::Glitchbytes => "GB",
        };
        format!("{}:{}", initial, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_declaration_order() {
        let mut sorted = OrbType::ALL;
        sorted.sort();
        assert_eq!(sorted, OrbType::ALL);
    }

    #[test]
    fn test_bomb_not_purchasable() {
        assert!(!OrbType::Bomb.is_purchasable());
        for ty in OrbType::ALL.iter().filter(|t| **t != OrbType::Bomb) {
            assert!(ty.is_purchasable(), "{ty} should be purchasable");
        }
    }

    #[test]
    fn test_serde_tag_matches_as_str() {
        for ty in OrbType::ALL {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.as_str()));
        }
    }

    #[test]
    fn test_whole_amount_truncates() {
        assert_eq!(Orb::new(OrbType::Bomb, 3.0).whole_amount(), 3);
        assert_eq!(Orb::new(OrbType::Bits, 2.9).whole_amount(), 2);
        assert_eq!(Orb::new(OrbType::Health, -1.0).whole_amount(), 0);
        assert_eq!(Orb::new(OrbType::Health, f64::NAN).whole_amount(), 0);
    }

    #[test]
    fn test_label() {
        assert_eq!(Orb::new(OrbType::Bomb, 3.0).label(), "B:3");
        assert_eq!(Orb::new(OrbType::Multiplier, 0.5).label(), "M:0.5");
    }
}
