use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Linha da tabela "applications" (candidatura a uma vaga/ranking)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Application {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "super::deserialize_optional_id")]
    pub ranking_id: Option<String>,
    #[serde(default)]
    pub applicant_name: Option<String>,
    #[serde(default)]
    pub resume_summary: Option<String>,
    /// Lista separada por vírgulas
    #[serde(default)]
    pub key_skills: Option<String>,
    #[serde(default)]
    pub experience_years: Option<f64>,
    #[serde(default)]
    pub education_level: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub scores: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub total_score: Option<i64>,
    #[serde(default)]
    pub rank: Option<i64>,
    #[serde(default)]
    pub scored_at: Option<String>,
}

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_SCORED: &str = "scored";

/// Resultado gravado na candidatura após o scoring
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ApplicationScoreUpdate {
    pub scores: BTreeMap<String, f64>,
    pub total_score: i64,
    pub status: &'static str,
    pub scored_at: String,
}
