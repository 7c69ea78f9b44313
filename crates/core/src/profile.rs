//! User profile records and their edit form.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::fields::{
    from_editable, to_editable, EditableEntity, FieldDef, FieldErrors, FieldKind, FormValues,
};
use crate::store::RecordUpdate;
use crate::types::UserId;

pub const FIELD_DISPLAY_NAME: &str = "display_name";
pub const FIELD_BIOGRAPHY: &str = "biography";

/// Profile edit form. `email` is shown read-only and never submitted.
pub const PROFILE_FIELDS: &[FieldDef] = &[
    FieldDef {
        name: FIELD_DISPLAY_NAME,
        label: "Display Name",
        kind: FieldKind::Text,
        required: true,
    },
    FieldDef {
        name: FIELD_BIOGRAPHY,
        label: "Biography",
        kind: FieldKind::LongText,
        required: false,
    },
];

/// A row of the `profiles` table.
///
/// `id` is the owning user's authentication id, so the profile owner is the
/// profile itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub biography: Option<String>,
}

/// Editable profile columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(min = 1, code = "required", message = "Display name is required"))]
    pub display_name: String,
    pub biography: Option<String>,
}

impl EditableEntity for Profile {
    type Update = ProfileUpdate;
    type Rules = ();

    const ENTITY: &'static str = "Profile";

    fn form_fields() -> &'static [FieldDef] {
        PROFILE_FIELDS
    }

    fn prefill(&self) -> FormValues {
        FormValues::new()
            .with(FIELD_DISPLAY_NAME, self.display_name.as_str())
            .with(FIELD_BIOGRAPHY, to_editable(self.biography.as_deref()))
    }

    fn owner(&self) -> UserId {
        self.id
    }

    fn parse_form(&self, values: &FormValues, _rules: &()) -> Result<ProfileUpdate, FieldErrors> {
        let update = ProfileUpdate {
            display_name: values.get(FIELD_DISPLAY_NAME).trim().to_string(),
            biography: from_editable(values.get(FIELD_BIOGRAPHY)),
        };
        match update.validate() {
            Ok(()) => Ok(update),
            Err(violations) => Err(violations.into()),
        }
    }

    fn record_update(&self, update: &ProfileUpdate) -> RecordUpdate {
        RecordUpdate::Profile {
            id: self.id,
            fields: update.clone(),
        }
    }

    fn apply(&mut self, update: ProfileUpdate) {
        self.display_name = update.display_name;
        self.biography = update.biography;
    }
}
