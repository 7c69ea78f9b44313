//! Plain-text rendering of cards, detail dialogs and edit results.

use std::fmt::Write;

use biodex_core::editor::{EditError, SubmitOutcome};
use biodex_core::fields::{FieldDef, FormValues};
use biodex_core::view::{Detailed, ProfileCard, SpeciesCard};

pub fn species_card(card: &SpeciesCard) -> String {
    let mut out = format!("#{} {}", card.record().id, card.title());
    if !card.subtitle().is_empty() {
        let _ = write!(out, " ({})", card.subtitle());
    }
    let preview = card.preview();
    if !preview.is_empty() {
        let _ = write!(out, "\n    {preview}");
    }
    if let Some(image) = card.thumbnail() {
        let _ = write!(out, "\n    [image] {image}");
    }
    out
}

pub fn profile_card(card: &ProfileCard) -> String {
    format!(
        "{} <{}>\n    id: {}",
        card.title(),
        card.subtitle(),
        card.record().id
    )
}

/// Render a list of cards separated by blank lines, or `empty` if none.
pub fn card_list<T>(cards: &[T], render: impl Fn(&T) -> String, empty: &str) -> String {
    if cards.is_empty() {
        return empty.to_string();
    }
    cards.iter().map(render).collect::<Vec<_>>().join("\n\n")
}

/// The read-only detail dialog: heading, optional image, labelled lines.
pub fn detail(record: &dyn Detailed) -> String {
    let title = record.detail_title();
    let mut out = format!("{title}\n{}", "=".repeat(title.len()));
    if let Some(image) = record.detail_image() {
        let _ = write!(out, "\n[image] {image}");
    }
    for line in record.detail_lines() {
        let _ = write!(out, "\n{}: {}", line.label, line.value);
    }
    out
}

/// The edit form as it would be pre-filled: one `label: value` per field.
pub fn edit_form(fields: &[FieldDef], values: &FormValues) -> String {
    fields
        .iter()
        .map(|f| {
            let mut line = format!("{}: {}", f.display_label(), values.get(f.name));
            if !f.options().is_empty() {
                let _ = write!(line, "  [{}]", f.options().join(" | "));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn outcome(outcome: &SubmitOutcome) -> String {
    match outcome {
        SubmitOutcome::Saved => "Changes saved.".to_string(),
        SubmitOutcome::Redirected => "Not signed in. Redirected to the landing page.".to_string(),
        SubmitOutcome::Rejected(EditError::Invalid(errors)) => {
            let mut out = errors.summary();
            for err in errors.iter() {
                let _ = write!(out, "\n  - {}: {}", err.field, err.message);
            }
            out
        }
        SubmitOutcome::Rejected(err) => err.to_string(),
        SubmitOutcome::Busy => "A save is already in progress.".to_string(),
        SubmitOutcome::NotOpen => "The edit dialog is not open.".to_string(),
        SubmitOutcome::Stale => "The edit was cancelled.".to_string(),
    }
}
