//! Observación de falla/censura: una muestra del análisis de supervivencia.

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Una muestra `(connector_type, serial, cycles, observed)`.
///
/// `observed = true` significa falla observada en `cycles`;
/// `observed = false` es censura por derecha (seguía funcionando la última
/// vez que se lo vio, con `cycles` usos acumulados).
/// Las observaciones son append-only: las correcciones son filas nuevas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureObservation {
    connector_type: String,
    serial_number: String,
    cycles: u64,
    observed: bool,
}

impl FailureObservation {
    pub fn new(
        connector_type: &str,
        serial_number: &str,
        cycles: u64,
        observed: bool,
    ) -> Result<Self, DomainError> {
        if connector_type.trim().is_empty() {
            return Err(DomainError::ValidationError("empty connector type".to_string()));
        }
        if serial_number.trim().is_empty() {
            return Err(DomainError::ValidationError("empty serial number".to_string()));
        }
        Ok(FailureObservation {
            connector_type: connector_type.to_string(),
            serial_number: serial_number.to_string(),
            cycles,
            observed,
        })
    }

    pub fn connector_type(&self) -> &str {
        &self.connector_type
    }

    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn observed(&self) -> bool {
        self.observed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn censored_and_observed_are_distinct_samples() {
        let a = FailureObservation::new("RF-A", "77", 100, true).unwrap();
        let b = FailureObservation::new("RF-A", "77", 100, false).unwrap();
        assert_ne!(a, b);
        assert!(a.observed());
        assert!(!b.observed());
    }

    #[test]
    fn empty_connector_is_rejected() {
        assert!(FailureObservation::new("  ", "77", 1, true).is_err());
    }
}
