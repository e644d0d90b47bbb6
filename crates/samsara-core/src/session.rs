// ── Login session ──
//
// What a successful login leaves behind: who the user is, the bearer
// token, and when the login stops being honoured locally.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use secrecy::SecretString;

use samsara_api::AuthResponse;

use crate::access::Area;
use crate::error::CoreError;
use crate::model::{RecordId, TipoAcesso, Usuario};

/// An authenticated back-office user.
#[derive(Clone)]
pub struct Session {
    pub user_id: RecordId,
    pub username: String,
    pub nome_completo: String,
    pub tipo_acesso: TipoAcesso,
    pub token: SecretString,
    pub issued_at: DateTime<Utc>,
    pub lifetime: Duration,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("tipo_acesso", &self.tipo_acesso)
            .field("issued_at", &self.issued_at)
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Build a session from an auth response issued at `issued_at`.
    pub fn from_auth(
        auth: AuthResponse,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<Self, CoreError> {
        let user: Usuario =
            serde_json::from_value(auth.record).map_err(|e| CoreError::Api {
                message: format!("Unexpected user record in auth response: {e}"),
                status: None,
            })?;
        Ok(Self {
            user_id: user.id,
            username: user.username,
            nome_completo: user.nome_completo,
            tipo_acesso: user.tipo_acesso,
            token: SecretString::from(auth.token),
            issued_at,
            lifetime,
        })
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let lifetime = TimeDelta::from_std(self.lifetime).ok()?;
        self.issued_at.checked_add_signed(lifetime)
    }

    /// A lifetime too large to represent never expires.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|deadline| now >= deadline)
    }

    /// Fail unless this session is live and may open `area`.
    pub fn authorize(&self, area: Area, now: DateTime<Utc>) -> Result<(), CoreError> {
        if self.is_expired(now) {
            return Err(CoreError::SessionExpired);
        }
        if self.tipo_acesso.can_access(area) {
            Ok(())
        } else {
            Err(CoreError::AccessDenied {
                tipo: self.tipo_acesso,
                area,
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn session(tipo: &str) -> Session {
        let auth = AuthResponse {
            token: "tok".into(),
            record: json!({
                "id": "u1",
                "username": "ana",
                "email": "ana@example.com",
                "nome_completo": "Ana Souza",
                "tipo_acesso": tipo,
                "obra": "",
                "obraX": ""
            }),
        };
        let issued = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        Session::from_auth(auth, issued, Duration::from_secs(8 * 60 * 60)).unwrap()
    }

    #[test]
    fn decodes_user_from_auth_record() {
        let s = session("Gerente_de_Frota");
        assert_eq!(s.user_id, "u1");
        assert_eq!(s.nome_completo, "Ana Souza");
        assert_eq!(s.tipo_acesso, TipoAcesso::GerenteDeFrota);
    }

    #[test]
    fn expires_after_lifetime() {
        let s = session("Administrador");
        let before = Utc.with_ymd_and_hms(2024, 5, 1, 15, 59, 59).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 5, 1, 16, 0, 0).unwrap();
        assert!(!s.is_expired(before));
        assert!(s.is_expired(after));
    }

    #[test]
    fn authorize_checks_expiry_then_profile() {
        let s = session("Encarregado");
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        assert!(s.authorize(Area::Boletins, now).is_ok());
        assert!(matches!(
            s.authorize(Area::Multas, now),
            Err(CoreError::AccessDenied { .. })
        ));

        let late = Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap();
        assert!(matches!(
            s.authorize(Area::Boletins, late),
            Err(CoreError::SessionExpired)
        ));
    }

    #[test]
    fn debug_hides_token() {
        let rendered = format!("{:?}", session("Administrador"));
        assert!(!rendered.contains("tok\""));
        assert!(rendered.contains("ana"));
    }
}
