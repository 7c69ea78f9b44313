//! Command-line surface of the `biodex` binary.

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use biodex_core::editor::{EditController, SubmitOutcome};
use biodex_core::fields::EditableEntity;
use biodex_core::profile::{FIELD_BIOGRAPHY, FIELD_DISPLAY_NAME};
use biodex_core::session::SessionProvider;
use biodex_core::species::{
    NameRequirement, FIELD_COMMON_NAME, FIELD_DESCRIPTION, FIELD_IMAGE, FIELD_KINGDOM,
    FIELD_SCIENTIFIC_NAME, FIELD_TOTAL_POPULATION,
};
use biodex_core::store::RecordStore;
use biodex_core::types::DbId;
use biodex_core::view::{Detailed, ProfileCard, SpeciesCard, ViewHost};

use crate::auth::jwt::{generate_access_token, JwtConfig};
use crate::error::AppResult;
use crate::pages::{self, Page};
use crate::render;

#[derive(Debug, Parser)]
#[command(name = "biodex", about = "Species and profile catalogue", version)]
pub struct Cli {
    /// Access token to act as (overrides BIODEX_ACCESS_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse and edit species
    #[command(subcommand)]
    Species(SpeciesCommand),
    /// Browse and edit user profiles
    #[command(subcommand)]
    Users(UsersCommand),
    /// Mint a development access token for a user
    Token {
        user_id: Uuid,
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum SpeciesCommand {
    List,
    Show { id: DbId },
    Edit {
        id: DbId,
        #[command(flatten)]
        edits: SpeciesEdits,
    },
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// Requires a session
    List,
    Show { id: Uuid },
    Edit {
        id: Uuid,
        #[command(flatten)]
        edits: ProfileEdits,
    },
}

/// Flags left out keep the current value; an empty string clears the field.
#[derive(Debug, Default, Args)]
pub struct SpeciesEdits {
    #[arg(long)]
    pub common_name: Option<String>,
    #[arg(long)]
    pub scientific_name: Option<String>,
    #[arg(long)]
    pub kingdom: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub total_population: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

impl SpeciesEdits {
    pub fn overrides(&self) -> Vec<(&'static str, String)> {
        [
            (FIELD_COMMON_NAME, &self.common_name),
            (FIELD_SCIENTIFIC_NAME, &self.scientific_name),
            (FIELD_KINGDOM, &self.kingdom),
            (FIELD_TOTAL_POPULATION, &self.total_population),
            (FIELD_IMAGE, &self.image),
            (FIELD_DESCRIPTION, &self.description),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.clone().map(|v| (field, v)))
        .collect()
    }
}

#[derive(Debug, Default, Args)]
pub struct ProfileEdits {
    #[arg(long)]
    pub display_name: Option<String>,
    #[arg(long)]
    pub biography: Option<String>,
}

impl ProfileEdits {
    pub fn overrides(&self) -> Vec<(&'static str, String)> {
        [
            (FIELD_DISPLAY_NAME, &self.display_name),
            (FIELD_BIOGRAPHY, &self.biography),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.clone().map(|v| (field, v)))
        .collect()
    }
}

/// Collaborators a command runs against.
pub struct App<'a> {
    pub store: &'a dyn RecordStore,
    pub sessions: &'a dyn SessionProvider,
    pub host: &'a dyn ViewHost,
    pub name_rule: NameRequirement,
    pub jwt: &'a JwtConfig,
}

pub fn mint_token(user_id: Uuid, email: Option<&str>, jwt: &JwtConfig) -> AppResult<String> {
    let token = generate_access_token(user_id, email, jwt)?;
    tracing::info!(%user_id, expiry_mins = jwt.access_token_expiry_mins, "Minted access token");
    Ok(token)
}

/// Run one command and return the text to print.
pub async fn run(command: Command, app: &App<'_>) -> AppResult<String> {
    match command {
        Command::Species(cmd) => run_species(cmd, app).await,
        Command::Users(cmd) => run_users(cmd, app).await,
        Command::Token { user_id, email } => mint_token(user_id, email.as_deref(), app.jwt),
    }
}

async fn run_species(command: SpeciesCommand, app: &App<'_>) -> AppResult<String> {
    match command {
        SpeciesCommand::List => {
            let cards = pages::species_page(app.store, app.name_rule).await?;
            Ok(render::card_list(&cards, render::species_card, "No species found."))
        }
        SpeciesCommand::Show { id } => {
            let mut card = SpeciesCard::new(app.store.find_species(id).await?, app.name_rule);
            card.detail.open();
            Ok(render::detail(card.record()))
        }
        SpeciesCommand::Edit { id, edits } => {
            let species = app.store.find_species(id).await?;
            tracing::info!(species_id = id, "Editing species");
            let mut editor = EditController::with_rules(species, app.name_rule);
            edit(&mut editor, &edits.overrides(), app).await
        }
    }
}

async fn run_users(command: UsersCommand, app: &App<'_>) -> AppResult<String> {
    match command {
        UsersCommand::List => match pages::users_page(app.store, app.sessions, app.host).await? {
            Page::Ready(cards) => Ok(render::card_list(
                &cards,
                render::profile_card,
                "No users found.",
            )),
            Page::Redirected(path) => Ok(format!("Sign in required. Redirected to {path}")),
        },
        UsersCommand::Show { id } => {
            let mut card = ProfileCard::new(app.store.find_profile(id).await?);
            card.detail.open();
            Ok(render::detail(card.record()))
        }
        UsersCommand::Edit { id, edits } => {
            let profile = app.store.find_profile(id).await?;
            tracing::info!(user_id = %id, "Editing profile");
            let mut editor = EditController::new(profile);
            edit(&mut editor, &edits.overrides(), app).await
        }
    }
}

async fn edit<E>(
    editor: &mut EditController<E>,
    overrides: &[(&'static str, String)],
    app: &App<'_>,
) -> AppResult<String>
where
    E: EditableEntity + Detailed,
{
    let attempt = pages::edit_record(editor, overrides, app.sessions, app.store, app.host).await;
    let mut out = render::outcome(&attempt.outcome);
    match attempt.outcome {
        SubmitOutcome::Saved => {
            out.push_str("\n\n");
            out.push_str(&render::detail(editor.entity()));
        }
        SubmitOutcome::Rejected(_) => {
            out.push_str("\n\n");
            out.push_str(&render::edit_form(editor.fields(), &attempt.submitted));
        }
        _ => {}
    }
    Ok(out)
}
