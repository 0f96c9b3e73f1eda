//! Fila de conteo de uso acumulado de un ítem físico.

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Uso acumulado de un `(part_number, serial_number)`. A lo sumo una fila
/// por par; el contador solo crece, de a 1 por evento aceptado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCounterRow {
    part_number: String,
    serial_number: String,
    usage_count: u64,
}

impl UsageCounterRow {
    /// Fila nueva: primer uso observado (count = 1).
    pub fn first_use(part_number: &str, serial_number: &str) -> Result<Self, DomainError> {
        Self::with_count(part_number, serial_number, 1)
    }

    /// Rehidratación desde persistencia con un conteo ya acumulado.
    pub fn with_count(part_number: &str, serial_number: &str, usage_count: u64) -> Result<Self, DomainError> {
        if part_number.trim().is_empty() {
            return Err(DomainError::ValidationError("empty part number".to_string()));
        }
        if serial_number.trim().is_empty() {
            return Err(DomainError::ValidationError("empty serial number".to_string()));
        }
        Ok(UsageCounterRow {
            part_number: part_number.to_string(),
            serial_number: serial_number.to_string(),
            usage_count,
        })
    }

    pub fn part_number(&self) -> &str {
        &self.part_number
    }

    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    pub fn usage_count(&self) -> u64 {
        self.usage_count
    }

    /// Igualdad exacta de clave (sin normalización adicional).
    pub fn matches(&self, part_number: &str, serial_number: &str) -> bool {
        self.part_number == part_number && self.serial_number == serial_number
    }

    /// Un evento aceptado más para este ítem.
    pub fn increment(&mut self) {
        self.usage_count += 1;
    }
}
