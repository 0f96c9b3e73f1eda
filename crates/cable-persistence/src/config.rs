//! Ruta del libro de trabajo desde variables de entorno.
//! Usa la convención `CABLE_TRACKER_FILE`, con default relativo al
//! directorio de trabajo.

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

/// Nombre por defecto del libro (documento JSON de hojas nombradas).
pub const DEFAULT_WORKBOOK_FILE: &str = "cable-tracker.json";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone)]
pub struct WorkbookConfig {
    pub path: PathBuf,
}

impl WorkbookConfig {
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        let path = env::var("CABLE_TRACKER_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_WORKBOOK_FILE));
        Self { path }
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
