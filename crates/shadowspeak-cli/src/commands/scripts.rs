use super::AppContext;
use super::utils::read_text;
use anyhow::{Result, bail};
use colored::Colorize;
use shadowspeak_core::script::MAX_SCRIPTS;
use shadowspeak_core::session::{SaveOutcome, SaveRejection};
use std::path::PathBuf;

pub fn list(context: &AppContext) -> Result<()> {
    let manager = context.open_manager();
    let scripts = manager.scripts();

    if scripts.is_empty() {
        println!("{}", "No saved scripts yet.".bright_black());
        return Ok(());
    }

    let now = chrono::Utc::now().timestamp_millis();
    for script in scripts {
        let summary = script.summary(now);
        println!(
            "{}  {}",
            summary.name.bold(),
            summary.id.bright_black()
        );
        println!(
            "    {} sentences · Updated {}",
            summary.sentence_count, summary.updated_label
        );
        if let Some(preview) = &summary.preview {
            let more = if summary.has_more { "..." } else { "" };
            println!("    {}{}", preview.italic(), more);
        }
    }
    println!(
        "{}",
        format!("{}/{} scripts saved", scripts.len(), MAX_SCRIPTS).bright_black()
    );
    Ok(())
}

pub fn show(context: &AppContext, id: &str) -> Result<()> {
    let manager = context.open_manager();
    let Some(script) = manager.store().get(id) else {
        bail!("No saved script with id '{}'", id);
    };

    println!("{}", script.name.bold());
    for (i, unit) in script.sentences.iter().enumerate() {
        let merged = if unit.is_merged() {
            format!(" ({} merged)", unit.original_indices.len())
                .bright_black()
                .to_string()
        } else {
            String::new()
        };
        println!("{:>3}. {}{}", i + 1, unit.text, merged);
    }
    Ok(())
}

pub fn save(context: &AppContext, name: &str, file: Option<PathBuf>) -> Result<()> {
    let text = read_text(file)?;
    let mut manager = context.open_manager();
    manager.start(&text);

    match manager.save_as(name)? {
        SaveOutcome::Saved(script) => {
            println!(
                "{} {} ({} sentences)",
                "Saved".green(),
                script.name.bold(),
                script.sentences.len()
            );
            println!("{}", script.id.bright_black());
            Ok(())
        }
        SaveOutcome::Rejected(reason) => bail!(rejection_message(reason)),
    }
}

pub fn delete(context: &AppContext, id: &str) -> Result<()> {
    let mut manager = context.open_manager();
    if manager.delete(id)? {
        println!("{} {}", "Deleted".green(), id);
    } else {
        println!("{}", format!("No saved script with id '{}'", id).yellow());
    }
    Ok(())
}

pub fn rejection_message(reason: SaveRejection) -> String {
    match reason {
        SaveRejection::InvalidName => "Script names must be 1 to 50 characters".to_string(),
        SaveRejection::EmptySession => "There are no sentences to save".to_string(),
        SaveRejection::StoreFull => format!(
            "Maximum {} scripts reached. Delete one to save a new script",
            MAX_SCRIPTS
        ),
    }
}
