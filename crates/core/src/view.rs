//! Card and detail-dialog view models.
//!
//! These are presentation contracts only: a card exposes what to show and
//! owns an [`EditController`] plus a read-only [`DetailDialog`]. Drawing is
//! left to the host.

use crate::editor::EditController;
use crate::fields::EditableEntity;
use crate::profile::Profile;
use crate::session::Session;
use crate::species::{NameRequirement, Species};

/// Number of description characters shown on a species card.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 150;

/// Navigation and refresh side effects requested by the edit flow.
pub trait ViewHost: Send + Sync {
    /// Leave the current view for `path`.
    fn redirect(&self, path: &str);

    /// Re-fetch the data behind the current view.
    fn refresh(&self);
}

/// Card blurb: the first [`DESCRIPTION_PREVIEW_CHARS`] characters, trimmed,
/// followed by `...`. Absent or empty descriptions render as nothing.
pub fn description_preview(description: Option<&str>) -> String {
    match description {
        Some(text) if !text.is_empty() => {
            let head: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
            format!("{}...", head.trim())
        }
        _ => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Detail dialog
// ---------------------------------------------------------------------------

/// Read-only modal with binary visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetailDialog {
    open: bool,
}

impl DetailDialog {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

/// One labelled attribute in a detail dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
    pub label: &'static str,
    pub value: String,
}

impl DetailLine {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Records that can be shown verbatim in a detail dialog.
pub trait Detailed {
    fn detail_title(&self) -> &'static str;

    fn detail_lines(&self) -> Vec<DetailLine>;

    /// Image rendered above the attributes, if any.
    fn detail_image(&self) -> Option<&str> {
        None
    }
}

impl Detailed for Species {
    fn detail_title(&self) -> &'static str {
        "Species Information"
    }

    fn detail_lines(&self) -> Vec<DetailLine> {
        vec![
            DetailLine::new("Species Name", self.common_name.clone().unwrap_or_default()),
            DetailLine::new(
                "Scientific Name",
                self.scientific_name.clone().unwrap_or_default(),
            ),
            DetailLine::new(
                "Total Population",
                self.total_population
                    .map(|n| n.to_string())
                    .unwrap_or_default(),
            ),
            DetailLine::new("Kingdom", self.kingdom.as_str()),
            DetailLine::new("Description", self.description.clone().unwrap_or_default()),
        ]
    }

    fn detail_image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

impl Detailed for Profile {
    fn detail_title(&self) -> &'static str {
        "Profile Information"
    }

    fn detail_lines(&self) -> Vec<DetailLine> {
        vec![
            DetailLine::new("Username", self.display_name.as_str()),
            DetailLine::new("Email", self.email.as_str()),
            DetailLine::new("Biography", self.biography.clone().unwrap_or_default()),
        ]
    }
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

/// A record card: summary, edit controller, and detail dialog.
pub struct Card<E: EditableEntity + Detailed> {
    pub editor: EditController<E>,
    pub detail: DetailDialog,
}

impl<E: EditableEntity + Detailed> Card<E> {
    pub fn with_rules(record: E, rules: E::Rules) -> Self {
        Self {
            editor: EditController::with_rules(record, rules),
            detail: DetailDialog::default(),
        }
    }

    /// The record as currently cached by the editor.
    pub fn record(&self) -> &E {
        self.editor.entity()
    }

    /// The edit affordance is shown to every viewer; see
    /// [`EditController::can_edit`] for hosts that hide it.
    pub fn shows_edit_button(&self, _session: Option<&Session>) -> bool {
        true
    }
}

pub type SpeciesCard = Card<Species>;
pub type ProfileCard = Card<Profile>;

impl Card<Species> {
    pub fn new(species: Species, rules: NameRequirement) -> Self {
        Self::with_rules(species, rules)
    }

    pub fn title(&self) -> &str {
        self.record().common_name.as_deref().unwrap_or_default()
    }

    pub fn subtitle(&self) -> &str {
        self.record().scientific_name.as_deref().unwrap_or_default()
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.record().image.as_deref()
    }

    pub fn preview(&self) -> String {
        description_preview(self.record().description.as_deref())
    }
}

impl Card<Profile> {
    pub fn new(profile: Profile) -> Self {
        Self::with_rules(profile, ())
    }

    pub fn title(&self) -> &str {
        &self.record().display_name
    }

    pub fn subtitle(&self) -> &str {
        &self.record().email
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kingdom::Kingdom;
    use uuid::Uuid;

    fn species(description: Option<&str>) -> Species {
        Species {
            id: 7,
            scientific_name: Some("Vulpes vulpes".into()),
            common_name: Some("Red Fox".into()),
            kingdom: Kingdom::Animalia,
            total_population: Some(12),
            description: description.map(str::to_string),
            image: Some("https://example.org/fox.jpg".into()),
            author: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_preview_of_absent_or_empty_description() {
        assert_eq!(description_preview(None), "");
        assert_eq!(description_preview(Some("")), "");
    }

    #[test]
    fn test_short_description_still_gets_ellipsis() {
        assert_eq!(description_preview(Some("A small fox. ")), "A small fox....");
    }

    #[test]
    fn test_long_description_is_cut_at_150_chars() {
        let text = "x".repeat(400);
        let preview = description_preview(Some(&text));
        assert_eq!(preview.chars().count(), DESCRIPTION_PREVIEW_CHARS + 3);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_preview_trims_after_cutting() {
        let mut text = "y".repeat(148);
        text.push_str("  tail");
        let preview = description_preview(Some(&text));
        assert_eq!(preview, format!("{}...", "y".repeat(148)));
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        let text = "é".repeat(200);
        let preview = description_preview(Some(&text));
        assert_eq!(preview, format!("{}...", "é".repeat(150)));
    }

    #[test]
    fn test_species_card_summary() {
        let card = SpeciesCard::new(species(Some("Cunning.")), NameRequirement::Strict);
        assert_eq!(card.title(), "Red Fox");
        assert_eq!(card.subtitle(), "Vulpes vulpes");
        assert_eq!(card.thumbnail(), Some("https://example.org/fox.jpg"));
        assert_eq!(card.preview(), "Cunning....");
        assert!(!card.detail.is_open());
        assert!(!card.editor.is_open());
    }

    #[test]
    fn test_detail_dialog_toggles() {
        let mut card = SpeciesCard::new(species(None), NameRequirement::Strict);
        card.detail.open();
        assert!(card.detail.is_open());
        card.detail.close();
        assert!(!card.detail.is_open());
    }

    #[test]
    fn test_species_detail_lines_render_verbatim() {
        let lines = species(None).detail_lines();
        let labels: Vec<&str> = lines.iter().map(|l| l.label).collect();
        assert_eq!(
            labels,
            ["Species Name", "Scientific Name", "Total Population", "Kingdom", "Description"]
        );
        assert_eq!(lines[2].value, "12");
        assert_eq!(lines[3].value, "Animalia");
        assert_eq!(lines[4].value, "");
    }

    #[test]
    fn test_profile_detail_lines() {
        let profile = Profile {
            id: Uuid::new_v4(),
            email: "ada@example.org".into(),
            display_name: "Ada".into(),
            biography: None,
        };
        let card = ProfileCard::new(profile);
        assert_eq!(card.title(), "Ada");
        assert_eq!(card.subtitle(), "ada@example.org");
        let lines = card.record().detail_lines();
        assert_eq!(lines[0].value, "Ada");
        assert_eq!(lines[1].value, "ada@example.org");
        assert_eq!(lines[2].value, "");
        assert_eq!(card.record().detail_image(), None);
    }

    #[test]
    fn test_edit_button_shown_to_everyone() {
        let card = SpeciesCard::new(species(None), NameRequirement::Strict);
        let stranger = Session::for_user(Uuid::new_v4());
        assert!(card.shows_edit_button(None));
        assert!(card.shows_edit_button(Some(&stranger)));
        assert!(!card.editor.can_edit(Some(&stranger)));
        assert!(!card.editor.can_edit(None));
    }
}
