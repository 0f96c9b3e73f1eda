//! Parser de archivos de log de equipo: texto crudo → `TestEvent`.
//!
//! Función pura, sin estado. Las cuatro reglas de extracción deben matchear
//! o el archivo completo produce `ParseFailure` con el campo faltante; un
//! archivo rechazado se salta con diagnóstico, nunca aborta el batch.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

use cable_domain::{TestEvent, TIMESTAMP_FORMAT};

use crate::errors::CoreError;

// Línea de arranque del log: timestamp con precisión de segundos seguido de
// "Test log started".
static RE_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2})\s+info\s+Test log started").unwrap()
});
static RE_TEST_TYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Test Type:\s*(\w+)").unwrap());
static RE_TEST_SET_SN: Lazy<Regex> = Lazy::new(|| Regex::new(r"Test Set SN: (\d+)").unwrap());
static RE_COAX_SN: Lazy<Regex> = Lazy::new(|| Regex::new(r"Coax Cable SN: (\d+)").unwrap());
static RE_SIGNAL_SN: Lazy<Regex> = Lazy::new(|| Regex::new(r"Signal Cable SN: (\d+)").unwrap());

fn capture<'t>(re: &Regex, text: &'t str, field: &str) -> Result<&'t str, CoreError> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| CoreError::ParseFailure { reason: format!("missing {field}") })
}

/// Parsea el texto completo de un archivo de log. Todos los campos son
/// obligatorios; el tipo de prueba se normaliza a mayúsculas en el
/// constructor del dominio.
pub fn parse_log(text: &str) -> Result<TestEvent, CoreError> {
    let ts_raw = capture(&RE_TIMESTAMP, text, "timestamp / test log header")?;
    let timestamp = NaiveDateTime::parse_from_str(ts_raw, TIMESTAMP_FORMAT)
        .map_err(|e| CoreError::ParseFailure { reason: format!("bad timestamp {ts_raw:?}: {e}") })?;
    let test_type = capture(&RE_TEST_TYPE, text, "Test Type field")?;
    let test_set_sn = capture(&RE_TEST_SET_SN, text, "Test Set SN field")?;
    let coax_sn = capture(&RE_COAX_SN, text, "Coax Cable SN field")?;
    let signal_sn = capture(&RE_SIGNAL_SN, text, "Signal Cable SN field")?;
    TestEvent::new(timestamp, test_type, test_set_sn, coax_sn, signal_sn)
        .map_err(|e| CoreError::ParseFailure { reason: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_LOG: &str = "\
2024-03-05 14:02:33  info  Test log started
Test Type: atp
Test Set SN: 1001
Coax Cable SN: 2002
Signal Cable SN: 3003
2024-03-05 14:09:41  info  Test log closed
";

    #[test]
    fn parses_a_complete_log() {
        let ev = parse_log(GOOD_LOG).unwrap();
        assert_eq!(ev.timestamp_key(), "2024-03-05 14:02:33");
        assert_eq!(ev.test_type(), "ATP");
        assert_eq!(ev.test_set_sn(), "1001");
        assert_eq!(ev.coax_sn(), "2002");
        assert_eq!(ev.signal_sn(), "3003");
    }

    #[test]
    fn missing_test_type_is_parse_failure() {
        let text = GOOD_LOG.replace("Test Type: atp\n", "");
        let err = parse_log(&text).unwrap_err();
        assert!(matches!(err, CoreError::ParseFailure { ref reason } if reason.contains("Test Type")));
    }

    #[test]
    fn missing_start_line_is_parse_failure() {
        let text = GOOD_LOG.replace("Test log started", "Test log resumed");
        assert!(parse_log(&text).is_err());
    }

    #[test]
    fn missing_serial_is_parse_failure() {
        let text = GOOD_LOG.replace("Coax Cable SN: 2002\n", "");
        let err = parse_log(&text).unwrap_err();
        assert!(matches!(err, CoreError::ParseFailure { ref reason } if reason.contains("Coax")));
    }

    #[test]
    fn unrelated_text_is_parse_failure() {
        assert!(parse_log("calibration report, nothing to see").is_err());
    }
}
