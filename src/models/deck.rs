use serde::{Deserialize, Serialize};

// ==================== DECK IMAGE ====================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckImageRequest {
    /// `cards[0]` is the leader.
    pub cards: Vec<DeckCardRef>,
    #[serde(default)]
    pub leader_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckCardRef {
    pub image: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

// ==================== DECK COMPOSITION ====================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckEntry {
    pub card_id: String,
    pub quantity: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckAddition {
    pub deck_id: String,
    pub card_id: String,
    pub quantity: u8,
}

// ==================== DECK STATS ====================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckStatsRequest {
    pub cards: Vec<StatCard>,
    pub life: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCard {
    pub cost: Option<u32>,
    pub power: Option<u32>,
    pub counter: Option<u32>,
    #[serde(default)]
    pub trigger: bool,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(rename = "type")]
    pub card_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurvePoint {
    pub value: u32,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckStatsResponse {
    pub total_cards: u32,
    pub average_cost: f64,
    pub cost_curve: Vec<CurvePoint>,
    pub power_curve: Vec<CurvePoint>,
    pub counter_distribution: Vec<CurvePoint>,
    pub trigger_count: u32,
    pub trigger_probability: f64,
}

// ==================== API RESPONSE ====================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_image_request_reads_camel_case() {
        let req: DeckImageRequest = serde_json::from_value(serde_json::json!({
            "cards": [
                { "image": "https://cdn.example/leader.png", "quantity": 1 },
                { "image": "https://cdn.example/a.png", "quantity": 2 }
            ],
            "leaderName": "Luffy"
        }))
        .unwrap();
        assert_eq!(req.leader_name, "Luffy");
        assert_eq!(req.cards[1].quantity, 2);
    }

    #[test]
    fn leader_name_and_quantity_are_optional() {
        let req: DeckImageRequest = serde_json::from_value(serde_json::json!({
            "cards": [{ "image": "https://cdn.example/leader.png" }]
        }))
        .unwrap();
        assert!(req.leader_name.is_empty());
        assert_eq!(req.cards[0].quantity, 1);
    }

    #[test]
    fn api_response_success_sets_flag() {
        let response = ApiResponse::success("ok");
        assert!(response.success);
        assert_eq!(response.data, "ok");
    }

    #[test]
    fn deck_addition_serializes_camel_case() {
        let value = serde_json::to_value(DeckAddition {
            deck_id: "d1".into(),
            card_id: "OP01-016".into(),
            quantity: 2,
        })
        .unwrap();
        assert_eq!(value["deckId"], "d1");
        assert_eq!(value["cardId"], "OP01-016");
    }

    #[test]
    fn deck_stats_response_serializes_camel_case() {
        let value = serde_json::to_value(DeckStatsResponse {
            total_cards: 4,
            average_cost: 2.0,
            cost_curve: vec![CurvePoint { value: 2, count: 4 }],
            power_curve: vec![],
            counter_distribution: vec![],
            trigger_count: 1,
            trigger_probability: 0.5,
        })
        .unwrap();

        for key in [
            "totalCards",
            "averageCost",
            "costCurve",
            "powerCurve",
            "counterDistribution",
            "triggerCount",
            "triggerProbability",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert!(value.get("total_cards").is_none());
        assert_eq!(value["costCurve"][0]["count"], 4);
    }
}
