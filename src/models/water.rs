use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct WaterLogAdd {
    pub amount_ml: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct WaterEntry {
    #[serde(default)]
    pub id: String,
    pub amount_ml: u32,
    #[serde(default)]
    pub time: Option<String>,
}

/// Total de agua de un día (`GET/POST /water-logs`, `DELETE /water-logs/last`)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct WaterLog {
    pub date: String,
    pub total_ml: u32,
    #[serde(default)]
    pub goal_ml: u32,
    #[serde(default)]
    pub entries: Vec<WaterEntry>,
}
