use super::utils::read_text;
use anyhow::Result;
use colored::Colorize;
use shadowspeak_core::sentence::segment;
use std::path::PathBuf;

pub fn run(file: Option<PathBuf>, json: bool) -> Result<()> {
    let text = read_text(file)?;
    let units = segment(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&units)?);
        return Ok(());
    }

    if units.is_empty() {
        println!("{}", "No sentences found.".bright_black());
        return Ok(());
    }
    for (i, unit) in units.iter().enumerate() {
        println!("{} {}", format!("{:>3}.", i + 1).bright_black(), unit.text);
    }
    Ok(())
}
