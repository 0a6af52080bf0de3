//! Shared utility functions for CLI commands

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::error::{CliError, Result};

/// Path meaning stdin or stdout
const STDIO: &str = "-";

pub fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO
}

/// Open the dashboard export, `-` meaning stdin
pub fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    if is_stdio(path) {
        return Ok(Box::new(io::stdin().lock()));
    }

    let file = fs::File::open(path).map_err(|err| CliError::io_at(path, err))?;
    Ok(Box::new(io::BufReader::new(file)))
}

/// Write the rendered document to a file, or stdout when none is given
pub fn write_output(path: Option<&Path>, content: &[u8]) -> Result<()> {
    match path.filter(|p| !is_stdio(p)) {
        Some(path) => fs::write(path, content).map_err(|err| CliError::io_at(path, err)),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content)?;
            stdout.flush()?;
            Ok(())
        }
    }
}

/// Display name of an output destination
pub fn output_label(path: Option<&Path>) -> String {
    match path.filter(|p| !is_stdio(p)) {
        Some(path) => path.display().to_string(),
        None => "stdout".to_string(),
    }
}
