//! Errores de persistencia.
//! Mapea fallas de I/O y de deserialización a variantes semánticas; el
//! core las ve como `StoreError`, fatal para la corrida: el batch aborta
//! si el libro no se puede abrir o escribir.

use cable_core::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    /// El archivo del libro no puede abrirse, leerse o escribirse.
    #[error("workbook unavailable: {0}")]
    Unavailable(String),
    /// El archivo existe pero no es un documento de libro interpretable.
    #[error("workbook corrupt: {0}")]
    Corrupt(String),
}

impl From<std::io::Error> for PersistenceError {
    fn from(e: std::io::Error) -> Self {
        PersistenceError::Unavailable(e.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(e: serde_json::Error) -> Self {
        PersistenceError::Corrupt(e.to_string())
    }
}

impl From<PersistenceError> for StoreError {
    fn from(e: PersistenceError) -> Self {
        match e {
            PersistenceError::Unavailable(msg) => StoreError::Unavailable(msg),
            PersistenceError::Corrupt(msg) => StoreError::Corrupt(msg),
        }
    }
}
