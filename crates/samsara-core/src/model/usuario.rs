// ── Usuario (back-office user) ──
//
// Lives in the store's auth collection, so creation carries a password
// and its confirmation.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::common::{RecordId, TipoAcesso};
use crate::repo::{Entity, Listed, Named};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Usuario {
    pub id: RecordId,
    pub username: String,
    pub email: String,
    pub nome_completo: String,
    pub tipo_acesso: TipoAcesso,
    pub obra: RecordId,
    #[serde(rename = "obraX")]
    pub obra_x: String,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "passwords_match", skip_on_field_errors = true))]
pub struct NewUsuario {
    #[validate(length(min = 3, max = 150, message = "usuário deve ter ao menos 3 caracteres"))]
    pub username: String,
    #[validate(email(message = "e-mail inválido"))]
    pub email: String,
    #[validate(length(min = 1, message = "nome é obrigatório"))]
    pub nome_completo: String,
    pub tipo_acesso: TipoAcesso,
    #[serde(default)]
    pub obra: RecordId,
    #[serde(default)]
    #[validate(length(min = 8, message = "senha deve ter ao menos 8 caracteres"))]
    pub password: String,
    #[serde(rename = "passwordConfirm", default)]
    pub password_confirm: String,
}

impl fmt::Debug for NewUsuario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUsuario")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("nome_completo", &self.nome_completo)
            .field("tipo_acesso", &self.tipo_acesso)
            .field("obra", &self.obra)
            .finish_non_exhaustive()
    }
}

fn passwords_match(body: &NewUsuario) -> Result<(), ValidationError> {
    if body.password == body.password_confirm {
        Ok(())
    } else {
        let mut err = ValidationError::new("password_confirm");
        err.message = Some("as senhas não conferem".into());
        Err(err)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UsuarioUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "e-mail inválido"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "nome é obrigatório"))]
    pub nome_completo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_acesso: Option<TipoAcesso>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obra: Option<RecordId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsuarioRow {
    pub id: RecordId,
    pub username: String,
    pub nome_completo: String,
    pub email: String,
    pub tipo_acesso: String,
    pub obra: String,
}

impl Entity for Usuario {
    const COLLECTION: &'static str = "usuarios";
    const LABEL: &'static str = "usuário";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Named for Usuario {
    fn display_name(&self) -> &str {
        &self.nome_completo
    }
}

impl Listed for Usuario {
    type Row = UsuarioRow;
    const DEFAULT_SORT: &'static str = "+nome_completo";

    fn to_row(&self) -> UsuarioRow {
        UsuarioRow {
            id: self.id.clone(),
            username: self.username.clone(),
            nome_completo: self.nome_completo.clone(),
            email: self.email.clone(),
            tipo_acesso: self.tipo_acesso.to_string(),
            obra: self.obra_x.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn body(confirm: &str) -> NewUsuario {
        NewUsuario {
            username: "ana".into(),
            email: "ana@example.com".into(),
            nome_completo: "Ana Souza".into(),
            tipo_acesso: TipoAcesso::Encarregado,
            obra: String::new(),
            password: "correct-horse".into(),
            password_confirm: confirm.into(),
        }
    }

    #[test]
    fn password_confirmation_must_match() {
        assert!(body("correct-horse").validate().is_ok());
        assert!(body("battery-staple").validate().is_err());
    }

    #[test]
    fn debug_hides_password() {
        let dbg = format!("{:?}", body("correct-horse"));
        assert!(!dbg.contains("correct-horse"));
    }

    #[test]
    fn body_uses_store_field_names() {
        let json = serde_json::to_value(body("correct-horse")).unwrap();
        assert_eq!(json["passwordConfirm"], "correct-horse");
        assert_eq!(json["tipo_acesso"], "Encarregado");
    }
}
