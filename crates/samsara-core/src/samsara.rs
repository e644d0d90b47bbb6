// ── Samsara facade ──
//
// One handle per record store: owns the HTTP client, the login session,
// and hands out per-collection accessors that borrow the client.

use std::sync::Arc;

use chrono::Utc;
use secrecy::SecretString;
use tokio::sync::Mutex;
use tracing::{debug, info};

use samsara_api::RecordClient;

use crate::access::Area;
use crate::config::{AuthCredentials, StoreConfig, USERS_COLLECTION};
use crate::error::CoreError;
use crate::model::{EquipamentoGrupo, Obra, OrdemServico, Operacao};
use crate::repo::Repo;
use crate::service::{
    Boletins, Catalogo, EquipamentoTipos, Equipamentos, Manutencoes, Multas, Operadores, Usuarios,
};
use crate::session::Session;

/// Entry point for consumers.
///
/// Cheaply cloneable via `Arc<SamsaraInner>`. Building one does not touch
/// the network; call [`connect()`](Self::connect) or
/// [`login()`](Self::login) to authenticate.
#[derive(Clone)]
pub struct Samsara {
    inner: Arc<SamsaraInner>,
}

struct SamsaraInner {
    config: StoreConfig,
    client: RecordClient,
    session: Mutex<Option<Session>>,
}

impl Samsara {
    pub fn new(config: StoreConfig) -> Result<Self, CoreError> {
        let client = RecordClient::new(config.url.as_str(), &config.transport())?;
        Ok(Self::with_client(config, client))
    }

    /// Wrap an already-built client (tests point it at a mock store).
    pub fn with_client(config: StoreConfig, client: RecordClient) -> Self {
        Self {
            inner: Arc::new(SamsaraInner {
                config,
                client,
                session: Mutex::new(None),
            }),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    pub fn client(&self) -> &RecordClient {
        &self.inner.client
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Authenticate with the configured credentials.
    ///
    /// A stored token is validated by exchanging it for a fresh one, which
    /// also identifies the user. Anonymous configs return `None`.
    pub async fn connect(&self) -> Result<Option<Session>, CoreError> {
        match &self.inner.config.auth {
            AuthCredentials::Token(token) => {
                self.inner.client.set_token(token.clone());
                let auth = self.inner.client.refresh_auth(USERS_COLLECTION).await?;
                let session =
                    Session::from_auth(auth, Utc::now(), self.inner.config.session_lifetime)?;
                debug!(username = %session.username, "token accepted");
                *self.inner.session.lock().await = Some(session.clone());
                Ok(Some(session))
            }
            AuthCredentials::Password { identity, password } => {
                self.login(identity, password).await.map(Some)
            }
            AuthCredentials::Anonymous => Ok(None),
        }
    }

    /// Log in as a back-office user and keep the session.
    pub async fn login(
        &self,
        identity: &str,
        password: &SecretString,
    ) -> Result<Session, CoreError> {
        let auth = self
            .inner
            .client
            .authenticate(USERS_COLLECTION, identity, password)
            .await?;
        let session = Session::from_auth(auth, Utc::now(), self.inner.config.session_lifetime)?;
        info!(
            username = %session.username,
            tipo_acesso = %session.tipo_acesso,
            "logged in"
        );
        *self.inner.session.lock().await = Some(session.clone());
        Ok(session)
    }

    /// Drop the token and the session.
    pub async fn logout(&self) {
        self.inner.client.logout();
        *self.inner.session.lock().await = None;
    }

    pub async fn session(&self) -> Option<Session> {
        self.inner.session.lock().await.clone()
    }

    /// Check the current session against `area`.
    ///
    /// Without a session (anonymous or not yet connected) the store's own
    /// collection rules are the only gate, so this passes.
    pub async fn authorize(&self, area: Area) -> Result<(), CoreError> {
        match self.inner.session.lock().await.as_ref() {
            Some(session) => session.authorize(area, Utc::now()),
            None => Ok(()),
        }
    }

    /// Ask the store to mail a reset link to `email`.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), CoreError> {
        self.inner
            .client
            .request_password_reset(USERS_COLLECTION, email.trim())
            .await?;
        Ok(())
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn obras(&self) -> Repo<'_, Obra> {
        Repo::new(&self.inner.client)
    }

    pub fn usuarios(&self) -> Usuarios<'_> {
        Usuarios::new(Repo::new(&self.inner.client))
    }

    pub fn operadores(&self) -> Operadores<'_> {
        Operadores::new(Repo::new(&self.inner.client))
    }

    pub fn equipamentos(&self) -> Equipamentos<'_> {
        Equipamentos::new(Repo::new(&self.inner.client))
    }

    pub fn equipamento_tipos(&self) -> EquipamentoTipos<'_> {
        EquipamentoTipos::new(Repo::new(&self.inner.client))
    }

    pub fn equipamento_grupos(&self) -> Repo<'_, EquipamentoGrupo> {
        Repo::new(&self.inner.client)
    }

    pub fn manutencoes(&self) -> Manutencoes<'_> {
        Manutencoes::new(Repo::new(&self.inner.client))
    }

    pub fn boletins(&self) -> Boletins<'_> {
        Boletins::new(Repo::new(&self.inner.client))
    }

    pub fn multas(&self) -> Multas<'_> {
        Multas::new(Repo::new(&self.inner.client))
    }

    pub fn operacoes(&self) -> Catalogo<'_, Operacao> {
        Catalogo::new(Repo::new(&self.inner.client))
    }

    pub fn ordens_servico(&self) -> Catalogo<'_, OrdemServico> {
        Catalogo::new(Repo::new(&self.inner.client))
    }
}
