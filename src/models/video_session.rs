use super::RowId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status de uma sessão de vídeo. Qualquer outro valor é rejeitado antes de chegar ao banco.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Scheduled,
    Active,
    Completed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::Active => "active",
            SessionStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(SessionStatus::Scheduled),
            "active" => Ok(SessionStatus::Active),
            "completed" => Ok(SessionStatus::Completed),
            other => Err(format!("Unknown session status: {}", other)),
        }
    }
}

/// Linha da tabela "video_sessions".
/// Só o que o serviço usa é tipado; as demais colunas (meeting_url, title, scheduled_at...)
/// ficam em `extra` e voltam intactas na resposta.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
pub struct VideoSession {
    #[schema(value_type = String)]
    pub id: RowId,
    pub meeting_id: String,
    pub status: SessionStatus,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
impl VideoSession {
    pub fn new(id: impl Into<RowId>, meeting_id: &str, status: SessionStatus) -> Self {
        Self {
            id: id.into(),
            meeting_id: meeting_id.to_string(),
            status,
            extra: serde_json::Map::new(),
        }
    }

    pub fn updated_at(&self) -> Option<&str> {
        self.extra.get("updated_at").and_then(serde_json::Value::as_str)
    }
}

/// Corpo do PATCH enviado ao banco ao trocar o status
#[derive(Debug, Serialize)]
pub struct SessionStatusUpdate<'a> {
    pub status: SessionStatus,
    pub updated_at: &'a str,
}
