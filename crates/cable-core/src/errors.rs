//! Errores del motor y del seam de almacenamiento.
//!
//! Política de propagación:
//! - `ParseFailure` es local a un archivo: se loguea y se salta, nunca
//!   aborta la corrida.
//! - `InsufficientData` es local a un tipo de conector: se omite del
//!   resultado del análisis.
//! - `StoreError` es fatal para la corrida completa y sube al caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoreError {
    /// El texto crudo no contiene un evento reconocible.
    #[error("parse failure: {reason}")]
    ParseFailure { reason: String },
    /// Un tipo de conector sin observaciones: no hay curva que estimar.
    #[error("insufficient data for connector type {connector_type}")]
    InsufficientData { connector_type: String },
    /// Fila persistida que no cumple el esquema de su hoja.
    #[error("sheet {sheet} row {row}: {reason}")]
    SheetSchema { sheet: String, row: usize, reason: String },
    #[error("internal: {0}")]
    Internal(String),
}

/// Errores del colaborador de almacenamiento tabular. La implementación
/// durable mapea sus fallas a estas variantes semánticas.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// El almacén no puede abrirse o escribirse. Fatal para la corrida.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// El documento persistido existe pero no puede interpretarse.
    #[error("store corrupt: {0}")]
    Corrupt(String),
}

impl From<cable_domain::DomainError> for CoreError {
    fn from(e: cable_domain::DomainError) -> Self {
        CoreError::Internal(e.to_string())
    }
}
