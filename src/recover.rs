//! Interactive reset of an unusable config file

use std::io::{BufRead, Write};
use std::path::Path;

use crosshair_core::{Config, config};

use crate::error::AppError;

/// Show `problems` and ask whether to reset `path` to defaults.
pub fn handle_invalid(path: &Path, problems: &str) -> Result<Config, AppError> {
    let stdin = std::io::stdin();
    let stderr = std::io::stderr();
    ask(stdin.lock(), stderr.lock(), path, problems)
}

fn ask<R: BufRead, W: Write>(
    mut input: R,
    mut out: W,
    path: &Path,
    problems: &str,
) -> Result<Config, AppError> {
    let file = path.display().to_string();
    write!(
        out,
        "\n╭─ Configuration Error ─────────────────────────────────────╮\n\
         │ File: {file:<53} │\n\
         ╰───────────────────────────────────────────────────────────╯\n\n\
         Problems found:\n  - {problems}\n\n\
         Options:\n  \
         [R] Reset to default configuration (backs up current file)\n  \
         [Q] Quit application\n\n\
         Choice [R/Q]: "
    )
    .and_then(|()| out.flush())
    .map_err(AppError::Terminal)?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(AppError::Terminal)?;
    if !line.trim().eq_ignore_ascii_case("r") {
        return Err(AppError::Quit);
    }

    let backup = config::backup_and_reset(path)?;
    let mut report = String::new();
    if let Some(backup) = backup {
        report.push_str(&format!("Backed up invalid config to: {}\n", backup.display()));
    }
    report.push_str(&format!("Created fresh configuration at: {}\n", path.display()));
    out.write_all(report.as_bytes()).map_err(AppError::Terminal)?;

    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reset_backs_up_and_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[crosshair]\nsize = 9000\n").unwrap();

        let mut out = Vec::new();
        let config = ask(Cursor::new("R\n"), &mut out, &path, "size out of range").unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(config, Config::default());
        assert!(out.contains("Problems found:\n  - size out of range"));
        assert!(out.contains("Backed up invalid config to:"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            config::DEFAULT_CONFIG_TEMPLATE
        );
        let backups = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("config.toml.bak."))
            .count();
        assert_eq!(backups, 1);
    }

    #[test]
    fn anything_else_quits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "broken").unwrap();

        for answer in ["q\n", "\n", "yes\n", ""] {
            let result = ask(Cursor::new(answer), Vec::new(), &path, "broken");
            assert!(matches!(result, Err(AppError::Quit)));
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "broken");
    }
}
