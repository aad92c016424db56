use super::RowId;
use serde::{Deserialize, Serialize};

/// Pesos por critério, como salvos pelo formulário de criação de ranking
pub type CriteriaWeights = serde_json::Map<String, serde_json::Value>;

/// Linha da tabela "rankings". Colunas não tipadas (title, position, description...) ficam em `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
pub struct Ranking {
    #[schema(value_type = String)]
    pub id: RowId,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub criteria_weights: Option<CriteriaWeights>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Item de GET /api/rankings: o ranking completo mais o total de candidaturas
#[derive(Debug, Clone, Serialize, PartialEq, utoipa::ToSchema)]
pub struct RankingSummary {
    #[serde(flatten)]
    pub ranking: Ranking,
    pub applications_count: u64,
}

#[cfg(test)]
impl Ranking {
    pub fn new(id: impl Into<RowId>) -> Self {
        Self {
            id: id.into(),
            criteria_weights: None,
            is_active: Some(true),
            created_at: None,
            extra: serde_json::Map::new(),
        }
    }
}
