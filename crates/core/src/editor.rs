//! Entity edit controller.
//!
//! The edit dialog is a small finite state machine:
//!
//! ```text
//!   Closed --open--> Open{error: None}
//!   Open{..} --cancel--> Closed
//!   Open{..} --submit--> Submitting --saved / redirect--> Closed
//!                                   --failed----------> Open{error: Some(..)}
//!   Submitting --cancel--> Closed   (the in-flight outcome becomes stale)
//! ```
//!
//! Transitions on [`EditDialog`] are pure. [`run_submit_protocol`] performs
//! the I/O (validation, session lookup, ownership check, store update) and
//! returns a [`Resolution`] that [`EditController::settle`] applies. Hosts
//! that detach the I/O from the controller can drive the three steps
//! themselves; everyone else calls [`EditController::submit`].

use std::fmt;

use crate::fields::{EditableEntity, FieldDef, FieldErrors, FormValues};
use crate::session::{
    authorize_owner, current_session, Session, SessionProvider, LANDING_ROUTE,
    WRONG_ACCOUNT_MESSAGE,
};
use crate::store::RecordStore;
use crate::view::ViewHost;

/// Inline message shown when the store rejects or fails an update.
pub const BACKEND_FAILURE_MESSAGE: &str = "Could not save changes, please try again";

// ---------------------------------------------------------------------------
// Errors and states
// ---------------------------------------------------------------------------

/// A recoverable submit failure. The dialog stays open and shows it inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Signed in, but not as the record's owner.
    WrongAccount,
    /// One or more fields failed validation.
    Invalid(FieldErrors),
    /// The store call failed; the detail is logged, not shown.
    Backend(String),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongAccount => f.write_str(WRONG_ACCOUNT_MESSAGE),
            Self::Invalid(errors) => f.write_str(&errors.summary()),
            Self::Backend(_) => f.write_str(BACKEND_FAILURE_MESSAGE),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DialogState {
    #[default]
    Closed,
    Open {
        error: Option<EditError>,
    },
    /// A submit is in flight; the save action is disabled.
    Submitting,
}

impl DialogState {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub fn error(&self) -> Option<&EditError> {
        match self {
            Self::Open { error } => error.as_ref(),
            _ => None,
        }
    }
}

/// Proof that a submit was started in a particular dialog generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket(u64);

/// Result of the submit protocol, before it is applied to the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<U> {
    /// The store acknowledged the update.
    Saved(U),
    /// No session: the caller must be sent to the landing route.
    Unauthenticated,
    Failed(EditError),
}

/// What a submit attempt did, as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Persisted; dialog closed and refresh signalled.
    Saved,
    /// No session; dialog closed and the host redirected.
    Redirected,
    /// Not persisted; dialog open with this error.
    Rejected(EditError),
    /// Another submit is already in flight.
    Busy,
    /// The dialog is closed.
    NotOpen,
    /// The dialog was cancelled while this submit was in flight.
    Stale,
}

// ---------------------------------------------------------------------------
// Dialog state machine
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct EditDialog {
    state: DialogState,
    generation: u64,
}

impl EditDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DialogState {
        &self.state
    }

    /// `Closed -> Open`. No effect on an open dialog.
    pub fn open(&mut self) {
        if self.state == DialogState::Closed {
            self.state = DialogState::Open { error: None };
        }
    }

    /// Close from any state, clearing the error. Any in-flight submit
    /// becomes stale.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.state = DialogState::Closed;
    }

    /// `Open -> Submitting`.
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, SubmitOutcome> {
        match self.state {
            DialogState::Closed => Err(SubmitOutcome::NotOpen),
            DialogState::Submitting => Err(SubmitOutcome::Busy),
            DialogState::Open { .. } => {
                self.state = DialogState::Submitting;
                Ok(SubmitTicket(self.generation))
            }
        }
    }

    fn is_current(&self, ticket: SubmitTicket) -> bool {
        ticket.0 == self.generation && self.state.is_submitting()
    }

    fn close(&mut self) {
        self.state = DialogState::Closed;
    }

    fn fail(&mut self, error: EditError) {
        self.state = DialogState::Open { error: Some(error) };
    }
}

// ---------------------------------------------------------------------------
// Submit protocol
// ---------------------------------------------------------------------------

/// Validate, authenticate, authorize, then persist.
///
/// Validation runs before the session is fetched so an incomplete form never
/// costs a round trip. At most one store call is made.
pub async fn run_submit_protocol<E: EditableEntity>(
    entity: &E,
    rules: &E::Rules,
    values: &FormValues,
    sessions: &dyn SessionProvider,
    store: &dyn RecordStore,
) -> Resolution<E::Update> {
    let update = match entity.parse_form(values, rules) {
        Ok(update) => update,
        Err(errors) => {
            tracing::debug!(entity = E::ENTITY, %errors, "Edit form failed validation");
            return Resolution::Failed(EditError::Invalid(errors));
        }
    };

    let Some(session) = current_session(sessions).await else {
        tracing::info!(entity = E::ENTITY, "No session, redirecting to landing route");
        return Resolution::Unauthenticated;
    };

    if authorize_owner(&session, entity.owner()).is_err() {
        tracing::warn!(
            entity = E::ENTITY,
            user_id = %session.user_id(),
            owner = %entity.owner(),
            "Edit rejected, caller does not own the record",
        );
        return Resolution::Failed(EditError::WrongAccount);
    }

    let record = entity.record_update(&update);
    match store.update(&record).await {
        Ok(()) => {
            tracing::info!(
                table = record.table(),
                id = %record.match_id(),
                user_id = %session.user_id(),
                "Record updated",
            );
            Resolution::Saved(update)
        }
        Err(err) => {
            tracing::error!(
                table = record.table(),
                id = %record.match_id(),
                error = %err,
                "Record update failed",
            );
            Resolution::Failed(EditError::Backend(err.to_string()))
        }
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Edit dialog bound to one record.
pub struct EditController<E: EditableEntity> {
    entity: E,
    rules: E::Rules,
    dialog: EditDialog,
}

impl<E: EditableEntity> EditController<E> {
    pub fn new(entity: E) -> Self {
        Self::with_rules(entity, E::Rules::default())
    }

    pub fn with_rules(entity: E, rules: E::Rules) -> Self {
        Self {
            entity,
            rules,
            dialog: EditDialog::new(),
        }
    }

    /// The record as last loaded or saved.
    pub fn entity(&self) -> &E {
        &self.entity
    }

    pub fn rules(&self) -> &E::Rules {
        &self.rules
    }

    pub fn fields(&self) -> &'static [FieldDef] {
        E::form_fields()
    }

    pub fn state(&self) -> &DialogState {
        self.dialog.state()
    }

    pub fn is_open(&self) -> bool {
        self.dialog.state().is_open()
    }

    pub fn error(&self) -> Option<&EditError> {
        self.dialog.state().error()
    }

    /// Open the dialog and return the pre-filled form.
    pub fn open(&mut self) -> FormValues {
        self.dialog.open();
        self.entity.prefill()
    }

    pub fn cancel(&mut self) {
        self.dialog.cancel();
    }

    /// Whether `session` would pass the ownership gate. The affordance is
    /// rendered regardless; hosts may use this to hide it.
    pub fn can_edit(&self, session: Option<&Session>) -> bool {
        session.is_some_and(|s| authorize_owner(s, self.entity.owner()).is_ok())
    }

    pub fn begin_submit(&mut self) -> Result<SubmitTicket, SubmitOutcome> {
        self.dialog.begin_submit()
    }

    /// Apply a protocol result. Results for a cancelled dialog are dropped
    /// without touching state, navigation, or refresh.
    pub fn settle(
        &mut self,
        ticket: SubmitTicket,
        resolution: Resolution<E::Update>,
        host: &dyn ViewHost,
    ) -> SubmitOutcome {
        if !self.dialog.is_current(ticket) {
            tracing::debug!(entity = E::ENTITY, "Discarding stale submit result");
            return SubmitOutcome::Stale;
        }

        match resolution {
            Resolution::Saved(update) => {
                self.entity.apply(update);
                self.dialog.close();
                host.refresh();
                SubmitOutcome::Saved
            }
            Resolution::Unauthenticated => {
                self.dialog.close();
                host.redirect(LANDING_ROUTE);
                SubmitOutcome::Redirected
            }
            Resolution::Failed(error) => {
                self.dialog.fail(error.clone());
                SubmitOutcome::Rejected(error)
            }
        }
    }

    /// Run the whole submit protocol against the given collaborators.
    pub async fn submit(
        &mut self,
        values: &FormValues,
        sessions: &dyn SessionProvider,
        store: &dyn RecordStore,
        host: &dyn ViewHost,
    ) -> SubmitOutcome {
        let ticket = match self.begin_submit() {
            Ok(ticket) => ticket,
            Err(outcome) => return outcome,
        };
        let resolution =
            run_submit_protocol(&self.entity, &self.rules, values, sessions, store).await;
        self.settle(ticket, resolution, host)
    }
}
