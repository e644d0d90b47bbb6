// ── Operacao / OrdemServico ──
//
// Code lookup tables referenced by boletim logs and equipment types. The
// only collections that allow hard delete.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::RecordId;
use crate::repo::{Coded, Deletable, Entity, Listed, Named};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Operacao {
    pub id: RecordId,
    pub codigo: String,
    pub descricao: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrdemServico {
    pub id: RecordId,
    pub codigo: String,
    pub descricao: String,
}

/// Create body shared by both catalogs.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CatalogoEntry {
    #[validate(length(min = 1, max = 20, message = "código deve ter entre 1 e 20 caracteres"))]
    pub codigo: String,
    #[validate(length(min = 1, message = "descrição é obrigatória"))]
    pub descricao: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CatalogoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "descrição é obrigatória"))]
    pub descricao: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogoRow {
    pub id: RecordId,
    pub codigo: String,
    pub descricao: String,
}

// ── Operacao ──

impl Entity for Operacao {
    const COLLECTION: &'static str = "operacoes";
    const LABEL: &'static str = "operação";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Named for Operacao {
    fn display_name(&self) -> &str {
        &self.codigo
    }
}

impl Coded for Operacao {
    const ACTIVE_ONLY: bool = false;

    fn codigo(&self) -> &str {
        &self.codigo
    }
}

impl Deletable for Operacao {}

impl Listed for Operacao {
    type Row = CatalogoRow;
    const DEFAULT_SORT: &'static str = "+codigo";

    fn to_row(&self) -> CatalogoRow {
        CatalogoRow {
            id: self.id.clone(),
            codigo: self.codigo.clone(),
            descricao: self.descricao.clone(),
        }
    }
}

// ── OrdemServico ──

impl Entity for OrdemServico {
    const COLLECTION: &'static str = "ordens_servico";
    const LABEL: &'static str = "ordem de serviço";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Named for OrdemServico {
    fn display_name(&self) -> &str {
        &self.codigo
    }
}

impl Coded for OrdemServico {
    const ACTIVE_ONLY: bool = false;

    fn codigo(&self) -> &str {
        &self.codigo
    }
}

impl Deletable for OrdemServico {}

impl Listed for OrdemServico {
    type Row = CatalogoRow;
    const DEFAULT_SORT: &'static str = "+codigo";

    fn to_row(&self) -> CatalogoRow {
        CatalogoRow {
            id: self.id.clone(),
            codigo: self.codigo.clone(),
            descricao: self.descricao.clone(),
        }
    }
}
