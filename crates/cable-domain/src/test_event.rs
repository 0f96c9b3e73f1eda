//! Evento de prueba parseado de un archivo de log.
//!
//! Rol en el flujo:
//! - El parser produce un `TestEvent` por archivo de log válido.
//! - El guard de ingesta deduplica por la clave de timestamp: dos eventos
//!   con el mismo segundo son el mismo evento (limitación documentada en
//!   `already_seen`).
//! - Un evento aceptado dispara exactamente tres actualizaciones de conteo,
//!   una por cada `PartRole`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Formato de timestamp de los logs de equipo (precisión de segundos).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Los tres roles físicos que un evento referencia por serial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartRole {
    Tester,
    CoaxCable,
    SignalCable,
}

impl PartRole {
    pub const ALL: [PartRole; 3] = [PartRole::Tester, PartRole::CoaxCable, PartRole::SignalCable];

    /// Sufijo del part number según el rol.
    pub fn label(&self) -> &'static str {
        match self {
            PartRole::Tester => "TESTER",
            PartRole::CoaxCable => "COAX CABLE",
            PartRole::SignalCable => "SIGNAL CABLE",
        }
    }

    /// Part number derivado: `"{TEST_TYPE} {ROL}"`.
    pub fn part_number(&self, test_type: &str) -> String {
        format!("{} {}", test_type, self.label())
    }
}

/// Ocurrencia única de una prueba, inmutable una vez construida.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestEvent {
    timestamp: NaiveDateTime,
    test_type: String,
    test_set_sn: String,
    coax_sn: String,
    signal_sn: String,
}

impl TestEvent {
    /// Constructor validante. Normaliza `test_type` a mayúsculas; exige
    /// seriales numéricos no vacíos (el formato que emiten los equipos).
    pub fn new(
        timestamp: NaiveDateTime,
        test_type: &str,
        test_set_sn: &str,
        coax_sn: &str,
        signal_sn: &str,
    ) -> Result<Self, DomainError> {
        let test_type = test_type.trim().to_uppercase();
        if test_type.is_empty() {
            return Err(DomainError::ValidationError("empty test type".to_string()));
        }
        for (name, sn) in [("test set", test_set_sn), ("coax", coax_sn), ("signal", signal_sn)] {
            if sn.is_empty() || !sn.chars().all(|c| c.is_ascii_digit()) {
                return Err(DomainError::ValidationError(format!(
                    "{name} SN must be a non-empty numeric string, got {sn:?}"
                )));
            }
        }
        Ok(TestEvent {
            timestamp,
            test_type,
            test_set_sn: test_set_sn.to_string(),
            coax_sn: coax_sn.to_string(),
            signal_sn: signal_sn.to_string(),
        })
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Clave textual de deduplicación (el timestamp tal como aparece en el
    /// log, segundo exacto).
    pub fn timestamp_key(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn test_type(&self) -> &str {
        &self.test_type
    }

    pub fn test_set_sn(&self) -> &str {
        &self.test_set_sn
    }

    pub fn coax_sn(&self) -> &str {
        &self.coax_sn
    }

    pub fn signal_sn(&self) -> &str {
        &self.signal_sn
    }

    /// Serial correspondiente a un rol.
    pub fn serial_for(&self, role: PartRole) -> &str {
        match role {
            PartRole::Tester => &self.test_set_sn,
            PartRole::CoaxCable => &self.coax_sn,
            PartRole::SignalCable => &self.signal_sn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(14, 2, 33).unwrap()
    }

    #[test]
    fn test_type_is_uppercased() {
        let ev = TestEvent::new(ts(), "atp", "100", "200", "300").unwrap();
        assert_eq!(ev.test_type(), "ATP");
        assert_eq!(PartRole::CoaxCable.part_number(ev.test_type()), "ATP COAX CABLE");
    }

    #[test]
    fn timestamp_key_is_second_precision() {
        let ev = TestEvent::new(ts(), "ATP", "1", "2", "3").unwrap();
        assert_eq!(ev.timestamp_key(), "2024-03-05 14:02:33");
    }

    #[test]
    fn non_numeric_serial_is_rejected (){
        assert!(TestEvent::new(ts(), "ATP", "12a", "2", "3").is_err());
        assert!(TestEvent::new(ts(), "ATP", "", "2", "3").is_err());
    }

    #[test]
    fn serial_for_matches_roles() {
        let ev = TestEvent::new(ts(), "ATP", "1", "2", "3").unwrap();
        assert_eq!(ev.serial_for(PartRole::Tester), "1");
        assert_eq!(ev.serial_for(PartRole::CoaxCable), "2");
        assert_eq!(ev.serial_for(PartRole::SignalCable), "3");
    }
}
