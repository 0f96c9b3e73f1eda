//! Seam de almacenamiento tabular (libro de hojas nombradas).
//!
//! Rol en el flujo:
//! - El core opera contra este trait; la implementación durable (archivo
//!   workbook JSON) vive en `cable-persistence`.
//! - `InMemorySheetStore` es el backend de paridad usado por los tests del
//!   motor: misma semántica observable que el backend durable.
//! - El caller serializa el acceso: una corrida lee todo el historial
//!   previo antes de decidir qué es nuevo y commitea de forma atómica
//!   respecto de esa lectura. No se soportan corridas concurrentes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::StoreError;

/// Una hoja: encabezado fijo más filas de celdas de texto, en orden de
/// append.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Operaciones que el core requiere del libro persistente.
pub trait SheetStore {
    /// Filas de una hoja en orden. Hoja inexistente: `Ok(None)`.
    fn read_sheet(&self, name: &str) -> Result<Option<Sheet>, StoreError>;
    /// Crea o reemplaza la hoja completa.
    fn write_sheet(&mut self, name: &str, header: Vec<String>, rows: Vec<Vec<String>>) -> Result<(), StoreError>;
    /// Agrega una fila; crea la hoja con `header` si no existía.
    fn append_row(&mut self, name: &str, header: &[String], row: Vec<String>) -> Result<(), StoreError>;
    fn sheet_exists(&self, name: &str) -> Result<bool, StoreError>;
    /// Nombres de hojas existentes, en orden estable.
    fn sheet_names(&self) -> Result<Vec<String>, StoreError>;
}

/// Backend en memoria (paridad 1:1 con el workbook durable).
#[derive(Debug, Default, Clone)]
pub struct InMemorySheetStore {
    sheets: BTreeMap<String, Sheet>,
}

impl InMemorySheetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SheetStore for InMemorySheetStore {
    fn read_sheet(&self, name: &str) -> Result<Option<Sheet>, StoreError> {
        Ok(self.sheets.get(name).cloned())
    }

    fn write_sheet(&mut self, name: &str, header: Vec<String>, rows: Vec<Vec<String>>) -> Result<(), StoreError> {
        self.sheets.insert(name.to_string(), Sheet { header, rows });
        Ok(())
    }

    fn append_row(&mut self, name: &str, header: &[String], row: Vec<String>) -> Result<(), StoreError> {
        let sheet = self.sheets.entry(name.to_string()).or_insert_with(|| Sheet {
            header: header.to_vec(),
            rows: Vec::new(),
        });
        sheet.rows.push(row);
        Ok(())
    }

    fn sheet_exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.sheets.contains_key(name))
    }

    fn sheet_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.sheets.keys().cloned().collect())
    }
}
