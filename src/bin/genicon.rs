use std::process::ExitCode;

use plate_icons::{config, generate_icons, logger, Config};

fn main() -> ExitCode {
    let (cfg, source) = config::read_config().unwrap_or_else(|e| {
        eprintln!("Warning: cannot read {}: {}, using defaults", config::CONFIG_FILE, e);
        (Config::default(), None)
    });
    logger::init(cfg.log_level);
    match &source {
        Some(path) => log::info!("settings from {}", path.display()),
        None => log::debug!("no {} found, using defaults", config::CONFIG_FILE),
    }

    match generate_icons(&cfg, |icon| println!("Created {}", icon.file_name())) {
        Ok(report) => {
            if let Some(path) = &report.manifest {
                println!("Wrote {}", path.display());
            }
            println!("All icons created successfully!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
