//! Guard de ingesta y libro de conteos de uso.
//!
//! El guard decide si un evento ya fue registrado; el libro mantiene los
//! contadores monotónicos por `(part_number, serial_number)`. Ambos operan
//! sobre estructuras en memoria rehidratadas de las hojas persistidas.

use cable_domain::{PartRole, TestEvent, UsageCounterRow};

use crate::errors::CoreError;
use crate::sheets;

/// Deduplicación por clave de timestamp, y nada más.
///
/// Compara la clave textual del evento contra todo el historial de logs
/// acumulado (todas las hojas `CableTester Logs - *`). Limitación conocida
/// del sistema: dos pruebas físicas distintas arrancadas en el mismo
/// segundo colapsan en una. Se deja así a propósito, sin clave compuesta.
pub fn already_seen<'a, I>(history: I, timestamp_key: &str) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    history.into_iter().any(|seen| seen == timestamp_key)
}

/// Libro de conteos en memoria. Conserva el orden de primera inserción para
/// que la persistencia sea estable corrida a corrida.
#[derive(Debug, Default, Clone)]
pub struct UsageLedger {
    rows: Vec<UsageCounterRow>,
}

impl UsageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehidrata el libro desde las filas de una hoja de conteo.
    pub fn from_rows(rows: Vec<UsageCounterRow>) -> Self {
        UsageLedger { rows }
    }

    /// Un uso más para el par. Crea la fila en 1 si es la primera
    /// referencia; si no, incrementa en exactamente 1. Igualdad exacta de
    /// strings en ambas claves.
    pub fn apply(&mut self, part_number: &str, serial_number: &str) -> Result<(), CoreError> {
        if let Some(row) = self.rows.iter_mut().find(|r| r.matches(part_number, serial_number)) {
            row.increment();
            return Ok(());
        }
        let row = UsageCounterRow::first_use(part_number, serial_number)?;
        self.rows.push(row);
        Ok(())
    }

    /// Aplica las tres actualizaciones de un evento aceptado, una por rol.
    pub fn apply_event(&mut self, event: &TestEvent) -> Result<(), CoreError> {
        for role in PartRole::ALL {
            self.apply(&role.part_number(event.test_type()), event.serial_for(role))?;
        }
        Ok(())
    }

    pub fn rows(&self) -> &[UsageCounterRow] {
        &self.rows
    }

    pub fn usage_count(&self, part_number: &str, serial_number: &str) -> Option<u64> {
        self.rows
            .iter()
            .find(|r| r.matches(part_number, serial_number))
            .map(|r| r.usage_count())
    }

    /// Celdas listas para `write_sheet` de la hoja de conteo.
    pub fn encode_rows(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(sheets::encode_count_row).collect()
    }
}
