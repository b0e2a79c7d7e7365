use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Reads practice text from a file, or from stdin for `None` and `-`.
pub fn read_text(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Parses a 1-based sentence number as shown to the user.
pub fn parse_position(arg: &str, len: usize) -> Option<usize> {
    let number: usize = arg.trim().parse().ok()?;
    (1..=len).contains(&number).then(|| number - 1)
}
