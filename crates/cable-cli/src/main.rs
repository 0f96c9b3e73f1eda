use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use cable_core::{run_analysis, run_ingest, RawLogFile};
use cable_domain::FailureObservation;
use cable_persistence::{WorkbookConfig, WorkbookStore};

const USAGE: &str = "\
Uso: cable-cli <comando> [opciones]

Comandos:
  ingest    --logs <DIR> [--file <WORKBOOK>]
  add-event --connector <TYPE> --serial <SN> --cycles <N> [--censored] [--file <WORKBOOK>]
  analyze   [--file <WORKBOOK>]
  report    [--file <WORKBOOK>]
";

fn main() {
    // Cargar .env si existe para obtener CABLE_TRACKER_FILE
    let _ = dotenvy::dotenv();
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprint!("{USAGE}");
        process::exit(2);
    }
    match args[1].as_str() {
        "ingest" => cmd_ingest(&args[2..]),
        "add-event" => cmd_add_event(&args[2..]),
        "analyze" => cmd_analyze(&args[2..]),
        "report" => cmd_report(&args[2..]),
        other => {
            eprintln!("comando desconocido: {other}");
            eprint!("{USAGE}");
            process::exit(2);
        }
    }
}

/// Valor que sigue a un flag, si está.
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    let mut i = 0;
    while i < args.len() {
        if args[i] == flag {
            i += 1;
            if i < args.len() {
                return Some(args[i].clone());
            }
        }
        i += 1;
    }
    None
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn workbook_path(args: &[String]) -> PathBuf {
    flag_value(args, "--file").map(PathBuf::from).unwrap_or_else(|| WorkbookConfig::from_env().path)
}

fn open_workbook(path: &Path) -> WorkbookStore {
    match WorkbookStore::open(path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("[cable-cli] no se pudo abrir el libro: {e}");
            process::exit(5);
        }
    }
}

fn commit_workbook(store: &WorkbookStore) {
    if let Err(e) = store.save() {
        eprintln!("[cable-cli] no se pudo guardar el libro: {e}");
        process::exit(5);
    }
}

/// Archivos `.log` / `.txt` del directorio, con su texto completo. Otros
/// archivos se ignoran en silencio; uno ilegible se salta con diagnóstico.
fn scan_logs_dir(dir: &Path) -> Vec<RawLogFile> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("[cable-cli] no se pudo listar {}: {e}", dir.display());
            process::exit(5);
        }
    };
    let mut files = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let is_log = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("log") || e.eq_ignore_ascii_case("txt"))
            .unwrap_or(false);
        if !is_log {
            continue;
        }
        match fs::read_to_string(&path) {
            Ok(text) => files.push(RawLogFile { name: path.display().to_string(), text }),
            Err(e) => eprintln!("[cable-cli] saltando {} (ilegible): {e}", path.display()),
        }
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    files
}

fn cmd_ingest(args: &[String]) {
    let Some(logs_dir) = flag_value(args, "--logs") else {
        eprintln!("Uso: cable-cli ingest --logs <DIR> [--file <WORKBOOK>]");
        process::exit(2);
    };
    let path = workbook_path(args);
    let files = scan_logs_dir(Path::new(&logs_dir));
    let mut store = open_workbook(&path);
    match run_ingest(&mut store, &files) {
        Ok(report) => {
            commit_workbook(&store);
            println!(
                "ingesta {}: {} archivo(s), {} nuevo(s), {} sin evento, {} duplicado(s)",
                report.run_id, report.files_seen, report.ingested, report.skipped_parse, report.skipped_duplicate
            );
        }
        Err(e) => {
            eprintln!("[cable-cli] ingesta abortada: {e}");
            process::exit(5);
        }
    }
}

fn cmd_add_event(args: &[String]) {
    let connector = flag_value(args, "--connector");
    let serial = flag_value(args, "--serial");
    let cycles = flag_value(args, "--cycles");
    let (Some(connector), Some(serial), Some(cycles)) = (connector, serial, cycles) else {
        eprintln!("Uso: cable-cli add-event --connector <TYPE> --serial <SN> --cycles <N> [--censored] [--file <WORKBOOK>]");
        process::exit(2);
    };
    let Ok(cycles) = cycles.parse::<u64>() else {
        eprintln!("[cable-cli] --cycles debe ser un entero no negativo, se recibió {cycles:?}");
        process::exit(4);
    };
    // observed=false solo cuando el usuario declara censura explícita
    let observed = !has_flag(args, "--censored");
    let obs = match FailureObservation::new(&connector, &serial, cycles, observed) {
        Ok(obs) => obs,
        Err(e) => {
            eprintln!("[cable-cli] evento rechazado: {e}");
            process::exit(4);
        }
    };

    let path = workbook_path(args);
    let mut store = open_workbook(&path);
    if let Err(e) = cable_core::record(&mut store, &obs) {
        eprintln!("[cable-cli] no se pudo registrar el evento: {e}");
        process::exit(5);
    }
    commit_workbook(&store);
    println!("evento registrado: {} SN {} a {} ciclo(s)", connector, serial, cycles);
}

fn cmd_analyze(args: &[String]) {
    let path = workbook_path(args);
    let mut store = open_workbook(&path);
    match run_analysis(&mut store) {
        Ok(report) => {
            commit_workbook(&store);
            println!("análisis {}: {} tipo(s) resumidos en Predictions", report.run_id, report.summaries.len());
            for omitted in &report.omitted {
                println!("  omitido por datos insuficientes: {omitted}");
            }
        }
        Err(e) => {
            eprintln!("[cable-cli] análisis abortado: {e}");
            process::exit(5);
        }
    }
}

fn cmd_report(args: &[String]) {
    let path = workbook_path(args);
    let mut store = open_workbook(&path);
    match run_analysis(&mut store) {
        Ok(report) => {
            commit_workbook(&store);
            print!("{}", cable_core::render_replacement_table(&report.curves));
        }
        Err(e) => {
            eprintln!("[cable-cli] reporte abortado: {e}");
            process::exit(5);
        }
    }
}
