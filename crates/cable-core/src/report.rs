//! Reporte de puntos de reemplazo recomendados (texto plano).
//!
//! Tabla por tipo de conector con el primer ciclo en que la supervivencia
//! cae a ≤ 20 %: pasado ese uso, el conector se considera a reemplazar.
//! `N/A` cuando la curva nunca baja hasta el umbral.

use std::fmt::Write as _;

use cable_domain::SurvivalCurve;

/// Umbral de reemplazo del reporte: 20 % de probabilidad de seguir
/// funcionando.
pub const REPLACEMENT_THRESHOLD: f64 = 0.2;

/// Tabla alineada de reemplazos recomendados.
pub fn render_replacement_table(curves: &[SurvivalCurve]) -> String {
    let mut out = String::new();
    out.push_str("Recommended Replacement Points:\n");
    let _ = writeln!(out, "{:<20} {:<25}", "Connector Type", "Replace After X Uses");
    out.push_str(&"-".repeat(45));
    out.push('\n');
    for curve in curves {
        let replace_after = curve
            .first_cycle_at_or_below(REPLACEMENT_THRESHOLD)
            .map(|c| c.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let _ = writeln!(out, "{:<20} {:<25}", curve.connector_type(), replace_after);
    }
    out
}
