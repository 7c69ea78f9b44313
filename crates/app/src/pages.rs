//! Page loaders and the edit entry point used by the CLI.
//!
//! Each page pulls its rows from the record store and wraps them in card
//! view models. The user list is protected: with no session the host is
//! redirected to the landing route instead.

use biodex_core::editor::{EditController, SubmitOutcome};
use biodex_core::fields::{EditableEntity, FormValues};
use biodex_core::session::{current_session, SessionProvider, LANDING_ROUTE};
use biodex_core::species::NameRequirement;
use biodex_core::store::RecordStore;
use biodex_core::view::{ProfileCard, SpeciesCard, ViewHost};

use crate::error::AppResult;

/// A page that either rendered or sent the caller elsewhere.
#[derive(Debug)]
pub enum Page<T> {
    Ready(T),
    Redirected(&'static str),
}

pub async fn species_page(
    store: &dyn RecordStore,
    rules: NameRequirement,
) -> AppResult<Vec<SpeciesCard>> {
    let species = store.list_species().await?;
    tracing::debug!(count = species.len(), "Loaded species page");
    Ok(species
        .into_iter()
        .map(|s| SpeciesCard::new(s, rules))
        .collect())
}

pub async fn users_page(
    store: &dyn RecordStore,
    sessions: &dyn SessionProvider,
    host: &dyn ViewHost,
) -> AppResult<Page<Vec<ProfileCard>>> {
    if current_session(sessions).await.is_none() {
        host.redirect(LANDING_ROUTE);
        return Ok(Page::Redirected(LANDING_ROUTE));
    }

    let profiles = store.list_profiles().await?;
    tracing::debug!(count = profiles.len(), "Loaded users page");
    Ok(Page::Ready(
        profiles.into_iter().map(ProfileCard::new).collect(),
    ))
}

/// Result of one edit: the outcome and the form exactly as submitted.
#[derive(Debug)]
pub struct EditAttempt {
    pub outcome: SubmitOutcome,
    /// What the dialog still holds when the submit is rejected.
    pub submitted: FormValues,
}

/// Open the edit dialog, overlay `edits` on the pre-filled form and submit.
///
/// Fields not named in `edits` keep their current value.
pub async fn edit_record<E: EditableEntity>(
    editor: &mut EditController<E>,
    edits: &[(&'static str, String)],
    sessions: &dyn SessionProvider,
    store: &dyn RecordStore,
    host: &dyn ViewHost,
) -> EditAttempt {
    let mut form = editor.open();
    for (field, value) in edits {
        form.set(*field, value.as_str());
    }
    let outcome = editor.submit(&form, sessions, store, host).await;
    EditAttempt {
        outcome,
        submitted: form,
    }
}
