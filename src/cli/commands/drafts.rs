use chrono::Local;
use stayhub_core::draft_store::{decode_session, DraftKey, DraftStore};
use stayhub_domain::Displayable;

use crate::cli::output;
use crate::{App, AppError};

pub fn list(app: &App) -> Result<(), AppError> {
    let rows = app.drafts().list_draft_metadata()?;
    if rows.is_empty() {
        output::info("No drafts saved.");
        return Ok(());
    }
    output::section("Drafts");
    for row in rows {
        let summary = match (row.category, row.step) {
            (Some(category), Some(step)) => {
                let name = row
                    .name
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| "(untitled)".into());
                format!("{name} [{category}] step {step}")
            }
            _ => "unreadable".to_string(),
        };
        let modified = row
            .modified_at
            .map(|at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        output::info(format!("{}  {}  {}", row.key, summary, modified));
    }
    Ok(())
}

pub fn show(app: &App, key: &str) -> Result<(), AppError> {
    let key = DraftKey::from_raw(key);
    let raw = app
        .drafts()
        .read(&key)?
        .ok_or_else(|| AppError::Usage(format!("No draft stored under `{key}`")))?;
    let session = decode_session(&raw)?;
    output::section(session.property_draft.display_label());
    output::info(format!(
        "Step {} | {} inventory item(s) | backend id: {}",
        session.current_step,
        session.room_types.len(),
        session.persisted_parent_id.as_deref().unwrap_or("none")
    ));
    output::info(serde_json::to_string_pretty(&session)?);
    Ok(())
}

pub fn clear(app: &App, key: &str) -> Result<(), AppError> {
    let key = DraftKey::from_raw(key);
    if app.drafts().read(&key)?.is_none() {
        output::warning(format!("No draft stored under `{key}`"));
        return Ok(());
    }
    app.drafts().remove(&key)?;
    output::success(format!("Draft `{key}` cleared."));
    Ok(())
}
