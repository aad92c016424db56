use super::RowId;
use serde::{Deserialize, Serialize};

/// Linha da tabela "users" (somente as colunas expostas pela API).
/// Colunas sensíveis (password_hash, códigos de verificação) são ignoradas na desserialização.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct User {
    #[schema(value_type = String)]
    pub id: RowId,
    pub email: String,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

/// Campos alterados por POST /api/auth/update-profile
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub firstname: String,
    pub lastname: String,
    pub company_name: String,
}

impl User {
    pub fn apply(&mut self, update: &ProfileUpdate) {
        self.firstname = Some(update.firstname.clone());
        self.lastname = Some(update.lastname.clone());
        self.company_name = Some(update.company_name.clone());
    }
}
