//! Terminal front end for the setup wizard

use std::io::{BufRead, Write};
use std::path::Path;

use crosshair_core::Monitor;
use crosshair_core::config;
use crosshair_core::wizard::{self, Effect, Input, Wizard};

use crate::error::AppError;

/// Run the wizard on stdin/stdout. Returns whether the overlay should start.
pub fn run(path: &Path, monitors: &[Monitor]) -> Result<bool, AppError> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    drive(stdin.lock(), stdout.lock(), path, monitors)
}

fn render<W: Write>(out: &mut W, state: &Wizard, monitors: &[Monitor]) -> std::io::Result<()> {
    let prompt = wizard::prompt(state, monitors);
    writeln!(out)?;
    writeln!(out, "{}", prompt.title)?;
    for (i, option) in prompt.options.iter().enumerate() {
        writeln!(out, "  {}) {option}", i + 1)?;
    }
    if let Some(hint) = &prompt.hint {
        writeln!(out, "  ({hint})")?;
    }
    if let Some(error) = &state.error {
        writeln!(out, "  ! {error}")?;
    }
    write!(out, "> ")?;
    out.flush()
}

fn drive<R: BufRead, W: Write>(
    mut input: R,
    mut out: W,
    path: &Path,
    monitors: &[Monitor],
) -> Result<bool, AppError> {
    let mut state = Wizard::new(monitors.len());

    writeln!(out, "crosshair setup (b = back, q = quit)").map_err(AppError::Terminal)?;

    while !state.is_finished() {
        render(&mut out, &state, monitors).map_err(AppError::Terminal)?;

        let mut line = String::new();
        let read = input.read_line(&mut line).map_err(AppError::Terminal)?;
        let event = if read == 0 {
            Input::Quit
        } else {
            wizard::parse_line(&state, &line)
        };

        let (next, effects) = wizard::transition(state, event);
        state = next;

        for effect in effects {
            match effect {
                Effect::Save(config) => match config::save(path, &config) {
                    Ok(()) => {
                        writeln!(out, "Saved configuration to {}", path.display())
                            .map_err(AppError::Terminal)?;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Wizard could not save configuration");
                        state = wizard::transition(state, Input::SaveFailed(e.to_string())).0;
                    }
                },
                Effect::Exit { start } => return Ok(start),
            }
        }
    }

    Ok(state.start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(lines: &[&str], path: &Path, monitors: &[Monitor]) -> (bool, String) {
        let script = lines.join("\n") + "\n";
        let mut out = Vec::new();
        let start = drive(Cursor::new(script), &mut out, path, monitors).unwrap();
        (start, String::from_utf8(out).unwrap())
    }

    #[test]
    fn dot_walkthrough_saves_without_starting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let (start, output) = run_script(
            &["2", "1", "8", "1", "1", "", "", "1", "2"],
            &path,
            &[],
        );

        assert!(!start);
        assert!(output.contains("Select crosshair shape:"));
        assert!(output.contains("  2) dot"));
        assert!(output.contains("Saved configuration to"));

        let saved = config::load(&path).unwrap();
        assert_eq!(saved.crosshair.shape, "dot");
        assert_eq!(saved.crosshair.size, 8);
        assert_eq!(saved.position.monitor, -1);
    }

    #[test]
    fn invalid_entry_is_reported_and_retried() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let (start, output) = run_script(&["1", "1", "9999", "q"], &path, &[]);

        assert!(!start);
        assert!(output.contains("  ! "));
        assert!(!path.exists());
    }

    #[test]
    fn end_of_input_quits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut out = Vec::new();

        let start = drive(Cursor::new(""), &mut out, &path, &[]).unwrap();
        assert!(!start);
        assert!(!path.exists());
    }
}
