use serde::{Deserialize, Serialize};

// ==================== CATALOG ====================

/// Card record as served by the catalog read API.
///
/// Multi-colour and multi-family values are `/`-separated (`"Red/Green"`).
/// Leaders carry no cost and most events no power, hence the options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogCard {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub images_small: String,
    #[serde(default)]
    pub images_large: String,
    #[serde(default)]
    pub color: String,
    #[serde(rename = "type", default)]
    pub card_type: String,
    pub cost: Option<u32>,
    pub power: Option<u32>,
    pub counter: Option<u32>,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub family: String,
    #[serde(default)]
    pub ability: String,
    pub trigger: Option<String>,
    pub attribute: Option<String>,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub set_name: String,
}

impl CatalogCard {
    pub fn colors(&self) -> impl Iterator<Item = &str> {
        split_multi(&self.color)
    }

    pub fn families(&self) -> impl Iterator<Item = &str> {
        split_multi(&self.family)
    }

    pub fn has_trigger(&self) -> bool {
        self.trigger
            .as_deref()
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn is_leader(&self) -> bool {
        self.card_type
            .eq_ignore_ascii_case(crate::constants::LEADER_TYPE)
    }
}

fn split_multi(raw: &str) -> impl Iterator<Item = &str> {
    raw.split('/').map(str::trim).filter(|s| !s.is_empty())
}
