//! Libro de trabajo sobre archivo: documento JSON de hojas nombradas.
//!
//! Semántica:
//! - `open`: archivo inexistente arranca un libro vacío (bootstrap);
//!   archivo ilegible es `Unavailable`, contenido no interpretable es
//!   `Corrupt`. Ambos fatales para la corrida.
//! - Las mutaciones quedan en memoria hasta `save`, que commitea de forma
//!   atómica respecto del archivo (escribe un temporal en el mismo
//!   directorio y renombra). Una corrida lee todo, opera y commitea; el
//!   caller serializa el acceso al archivo.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use cable_core::{Sheet, SheetStore, StoreError};

use crate::error::PersistenceError;

/// Forma serializada del libro completo.
#[derive(Debug, Default, Serialize, Deserialize)]
struct WorkbookDocument {
    sheets: BTreeMap<String, Sheet>,
}

/// `SheetStore` durable sobre un documento JSON.
#[derive(Debug)]
pub struct WorkbookStore {
    path: PathBuf,
    document: WorkbookDocument,
}

impl WorkbookStore {
    /// Abre el libro en `path`, o arranca uno vacío si el archivo no
    /// existe todavía.
    pub fn open(path: &Path) -> Result<Self, PersistenceError> {
        if !path.exists() {
            debug!("workbook {} missing, starting empty", path.display());
            return Ok(WorkbookStore { path: path.to_path_buf(), document: WorkbookDocument::default() });
        }
        let raw = fs::read_to_string(path)
            .map_err(|e| PersistenceError::Unavailable(format!("{}: {e}", path.display())))?;
        let document: WorkbookDocument = serde_json::from_str(&raw)
            .map_err(|e| PersistenceError::Corrupt(format!("{}: {e}", path.display())))?;
        Ok(WorkbookStore { path: path.to_path_buf(), document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Commit atómico: temporal en el mismo directorio + rename.
    pub fn save(&self) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| PersistenceError::Unavailable(format!("{}: {e}", parent.display())))?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        let raw = serde_json::to_string_pretty(&self.document)?;
        fs::write(&tmp, raw).map_err(|e| PersistenceError::Unavailable(format!("{}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| PersistenceError::Unavailable(format!("{}: {e}", self.path.display())))?;
        debug!("workbook saved to {}", self.path.display());
        Ok(())
    }
}

impl SheetStore for WorkbookStore {
    fn read_sheet(&self, name: &str) -> Result<Option<Sheet>, StoreError> {
        Ok(self.document.sheets.get(name).cloned())
    }

    fn write_sheet(&mut self, name: &str, header: Vec<String>, rows: Vec<Vec<String>>) -> Result<(), StoreError> {
        self.document.sheets.insert(name.to_string(), Sheet { header, rows });
        Ok(())
    }

    fn append_row(&mut self, name: &str, header: &[String], row: Vec<String>) -> Result<(), StoreError> {
        let sheet = self.document.sheets.entry(name.to_string()).or_insert_with(|| Sheet {
            header: header.to_vec(),
            rows: Vec::new(),
        });
        sheet.rows.push(row);
        Ok(())
    }

    fn sheet_exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.document.sheets.contains_key(name))
    }

    fn sheet_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.document.sheets.keys().cloned().collect())
    }
}
