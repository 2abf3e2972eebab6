//! Catalog definitions: production upgrades, skins and tiered bonuses.
//!
//! The catalog is read-only data loaded once from JSON. Each list parses on
//! its own; a list that fails to parse is logged and treated as empty so the
//! rest of the game keeps working.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::number::Num;

const BUNDLED_UPGRADES: &str = include_str!("../../data/upgrades.json");
const BUNDLED_SKINS: &str = include_str!("../../data/skins.json");
const BUNDLED_TIERS: &str = include_str!("../../data/single_upgrades.json");

/// What a tiered bonus multiplies.
///
/// In catalog JSON this is the `baseUpgradeId` string: `"manual"`,
/// `"global"` and `"endgame"` are reserved, anything else names an upgrade.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Channel {
    /// Scales one production upgrade's per-unit rate.
    Upgrade(String),
    /// Scales the value of a direct click.
    Manual,
    /// Scales total passive production.
    Global,
    /// The final bonus; buying it completes the game.
    Terminal,
}

impl Channel {
    pub fn parse(s: &str) -> Self {
        match s {
            "manual" => Channel::Manual,
            "global" => Channel::Global,
            "endgame" => Channel::Terminal,
            id => Channel::Upgrade(id.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Channel::Upgrade(id) => id,
            Channel::Manual => "manual",
            Channel::Global => "global",
            Channel::Terminal => "endgame",
        }
    }
}

impl From<String> for Channel {
    fn from(s: String) -> Self {
        Channel::parse(&s)
    }
}

impl From<Channel> for String {
    fn from(c: Channel) -> Self {
        c.as_str().to_string()
    }
}

/// A repeatably purchasable producer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductionUpgrade {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_price: Num,
    /// Currency per second per owned unit.
    pub base_cps: Num,
    #[serde(default)]
    pub icon: String,
}

/// A cosmetic button skin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Skin {
    pub id: String,
    pub name: String,
    /// Asset key; this is what gets equipped.
    pub value: String,
    pub price: Num,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierLevel {
    pub level: u32,
    pub price: Num,
    pub multiplier: f64,
    /// Owned units of the channel's upgrade needed before this level can be
    /// bought. Ignored for manual, global and terminal channels.
    #[serde(default)]
    pub unlock_requirement: u64,
}

/// A one-time bonus with several levels, each bought once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TieredBonus {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(rename = "baseUpgradeId")]
    pub channel: Channel,
    #[serde(default)]
    pub levels: Vec<TierLevel>,
}

impl TieredBonus {
    pub fn level(&self, level: u32) -> Option<&TierLevel> {
        self.levels.iter().find(|l| l.level == level)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to parse {kind} catalog: {source}")]
    Parse {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    pub upgrades: Vec<ProductionUpgrade>,
    pub skins: Vec<Skin>,
    pub tiers: Vec<TieredBonus>,
}

impl Catalog {
    /// The catalog shipped in `data/`.
    pub fn bundled() -> Self {
        Self::from_json_lists(BUNDLED_UPGRADES, BUNDLED_SKINS, BUNDLED_TIERS)
    }

    /// Build a catalog from three JSON arrays. A list that fails to parse
    /// is logged and left empty.
    pub fn from_json_lists(upgrades: &str, skins: &str, tiers: &str) -> Self {
        Self {
            upgrades: parse_or_empty("upgrade", upgrades),
            skins: parse_or_empty("skin", skins),
            tiers: parse_or_empty("tiered bonus", tiers),
        }
    }

    pub fn upgrade(&self, id: &str) -> Option<&ProductionUpgrade> {
        self.upgrades.iter().find(|u| u.id == id)
    }

    pub fn skin(&self, id: &str) -> Option<&Skin> {
        self.skins.iter().find(|s| s.id == id)
    }

    pub fn tier(&self, id: &str) -> Option<&TieredBonus> {
        self.tiers.iter().find(|t| t.id == id)
    }
}

pub fn parse_list<T: DeserializeOwned>(kind: &'static str, json: &str) -> Result<Vec<T>, CatalogError> {
    serde_json::from_str(json).map_err(|source| CatalogError::Parse { kind, source })
}

fn parse_or_empty<T: DeserializeOwned>(kind: &'static str, json: &str) -> Vec<T> {
    match parse_list(kind, json) {
        Ok(list) => list,
        Err(e) => {
            log::warn!("{e}; continuing without {kind} entries");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_loads_every_list() {
        let catalog = Catalog::bundled();
        assert_eq!(catalog.upgrades.len(), 6);
        assert!(catalog.skin("default").is_some());
        assert!(!catalog.tiers.is_empty());
    }

    #[test]
    fn bundled_catalog_has_one_terminal_bonus() {
        let catalog = Catalog::bundled();
        let terminal: Vec<_> = catalog
            .tiers
            .iter()
            .filter(|t| t.channel == Channel::Terminal)
            .collect();
        assert_eq!(terminal.len(), 1);
        assert_eq!(terminal[0].id, "endgame_upgrade");
    }

    #[test]
    fn bundled_tiers_target_known_channels() {
        let catalog = Catalog::bundled();
        for bonus in &catalog.tiers {
            if let Channel::Upgrade(id) = &bonus.channel {
                assert!(catalog.upgrade(id).is_some(), "{} targets unknown {}", bonus.id, id);
            }
            assert!(bonus.levels.iter().all(|l| l.multiplier > 1.0));
        }
    }

    #[test]
    fn channel_parses_reserved_names() {
        assert_eq!(Channel::parse("manual"), Channel::Manual);
        assert_eq!(Channel::parse("global"), Channel::Global);
        assert_eq!(Channel::parse("endgame"), Channel::Terminal);
        assert_eq!(Channel::parse("intern"), Channel::Upgrade("intern".into()));
    }

    #[test]
    fn channel_serializes_as_plain_string() {
        let json = serde_json::to_string(&Channel::Manual).unwrap();
        assert_eq!(json, "\"manual\"");
        let back: Channel = serde_json::from_str("\"click_farm\"").unwrap();
        assert_eq!(back, Channel::Upgrade("click_farm".into()));
    }

    #[test]
    fn tier_json_uses_camel_case_fields() {
        let json = r#"[{
            "id": "x", "name": "X", "baseUpgradeId": "global",
            "levels": [{ "level": 1, "price": 10, "multiplier": 2, "unlockRequirement": 3 }]
        }]"#;
        let tiers: Vec<TieredBonus> = parse_list("tiered bonus", json).unwrap();
        assert_eq!(tiers[0].channel, Channel::Global);
        assert_eq!(tiers[0].levels[0].unlock_requirement, 3);
        assert_eq!(tiers[0].level(1).map(|l| l.multiplier), Some(2.0));
        assert!(tiers[0].level(2).is_none());
    }

    #[test]
    fn broken_list_degrades_to_empty() {
        let catalog = Catalog::from_json_lists("not json", "[]", "{\"oops\": 1}");
        assert!(catalog.upgrades.is_empty());
        assert!(catalog.skins.is_empty());
        assert!(catalog.tiers.is_empty());
    }

    #[test]
    fn one_broken_list_leaves_others_intact() {
        let upgrades = r#"[{ "id": "a", "name": "A", "base_price": 10, "base_cps": 1 }]"#;
        let catalog = Catalog::from_json_lists(upgrades, "garbage", "[]");
        assert_eq!(catalog.upgrades.len(), 1);
        assert!(catalog.skins.is_empty());
    }

    #[test]
    fn parse_error_names_the_list() {
        let err = parse_list::<Skin>("skin", "[1]").unwrap_err();
        assert!(err.to_string().contains("skin catalog"));
    }
}
