//! Species records and their edit form.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::fields::{
    from_editable, from_editable_text, parse_count, to_editable, EditableEntity, FieldDef,
    FieldErrors, FieldKind, FormValues,
};
use crate::kingdom::{Kingdom, KINGDOM_NAMES};
use crate::store::RecordUpdate;
use crate::types::{DbId, UserId};

pub const FIELD_SCIENTIFIC_NAME: &str = "scientific_name";
pub const FIELD_COMMON_NAME: &str = "common_name";
pub const FIELD_KINGDOM: &str = "kingdom";
pub const FIELD_TOTAL_POPULATION: &str = "total_population";
pub const FIELD_IMAGE: &str = "image";
pub const FIELD_DESCRIPTION: &str = "description";

/// Species edit form, in display order.
pub const SPECIES_FIELDS: &[FieldDef] = &[
    FieldDef {
        name: FIELD_SCIENTIFIC_NAME,
        label: "Scientific Name",
        kind: FieldKind::Text,
        required: true,
    },
    FieldDef {
        name: FIELD_COMMON_NAME,
        label: "Common Name",
        kind: FieldKind::Text,
        required: true,
    },
    FieldDef {
        name: FIELD_KINGDOM,
        label: "Kingdom",
        kind: FieldKind::Choice(KINGDOM_NAMES),
        required: true,
    },
    FieldDef {
        name: FIELD_TOTAL_POPULATION,
        label: "Total population",
        kind: FieldKind::Number,
        required: false,
    },
    FieldDef {
        name: FIELD_IMAGE,
        label: "Image URL",
        kind: FieldKind::Url,
        required: false,
    },
    FieldDef {
        name: FIELD_DESCRIPTION,
        label: "Description",
        kind: FieldKind::LongText,
        required: false,
    },
];

/// A row of the `species` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub id: DbId,
    pub scientific_name: Option<String>,
    pub common_name: Option<String>,
    pub kingdom: Kingdom,
    pub total_population: Option<i64>,
    pub description: Option<String>,
    pub image: Option<String>,
    /// Owning user. Never written by the edit flow.
    pub author: UserId,
}

/// Editable species columns. `id` and `author` are deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SpeciesUpdate {
    pub scientific_name: Option<String>,
    pub common_name: Option<String>,
    pub kingdom: Kingdom,
    #[validate(range(min = 0, message = "Total population cannot be negative"))]
    pub total_population: Option<i64>,
    #[validate(url(message = "Image must be a valid URL"))]
    pub image: Option<String>,
    pub description: Option<String>,
}

/// Whether the two name fields must be filled in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameRequirement {
    /// Both `scientific_name` and `common_name` must be non-empty.
    #[default]
    Strict,
    /// Either name may be left blank.
    Lenient,
}

impl FromStr for NameRequirement {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            other => Err(CoreError::Validation(format!(
                "Invalid name rule '{other}'. Must be one of: strict, lenient"
            ))),
        }
    }
}

/// Resolve the selector value, re-checking it against the closed enumeration.
fn select_kingdom(raw: &str, errors: &mut FieldErrors) -> Option<Kingdom> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.required(FIELD_KINGDOM, "Kingdom is required");
        return None;
    }
    match raw.parse::<Kingdom>() {
        Ok(kingdom) => Some(kingdom),
        Err(_) => {
            errors.invalid(
                FIELD_KINGDOM,
                format!("Kingdom must be one of: {}", KINGDOM_NAMES.join(", ")),
            );
            None
        }
    }
}

impl EditableEntity for Species {
    type Update = SpeciesUpdate;
    type Rules = NameRequirement;

    const ENTITY: &'static str = "Species";

    fn form_fields() -> &'static [FieldDef] {
        SPECIES_FIELDS
    }

    fn prefill(&self) -> FormValues {
        FormValues::new()
            .with(
                FIELD_SCIENTIFIC_NAME,
                to_editable(self.scientific_name.as_deref()),
            )
            .with(FIELD_COMMON_NAME, to_editable(self.common_name.as_deref()))
            .with(FIELD_KINGDOM, self.kingdom.as_str())
            .with(
                FIELD_TOTAL_POPULATION,
                self.total_population
                    .map(|n| n.to_string())
                    .unwrap_or_default(),
            )
            .with(FIELD_IMAGE, to_editable(self.image.as_deref()))
            .with(FIELD_DESCRIPTION, to_editable(self.description.as_deref()))
    }

    fn owner(&self) -> UserId {
        self.author
    }

    fn parse_form(
        &self,
        values: &FormValues,
        rules: &NameRequirement,
    ) -> Result<SpeciesUpdate, FieldErrors> {
        let mut errors = FieldErrors::default();

        let scientific_name = from_editable(values.get(FIELD_SCIENTIFIC_NAME));
        let common_name = from_editable(values.get(FIELD_COMMON_NAME));
        if *rules == NameRequirement::Strict {
            if scientific_name.is_none() {
                errors.required(FIELD_SCIENTIFIC_NAME, "Scientific name is required");
            }
            if common_name.is_none() {
                errors.required(FIELD_COMMON_NAME, "Common name is required");
            }
        }

        let kingdom = select_kingdom(values.get(FIELD_KINGDOM), &mut errors);

        let total_population = match parse_count(values.get(FIELD_TOTAL_POPULATION)) {
            Ok(n) => n,
            Err(message) => {
                errors.invalid(FIELD_TOTAL_POPULATION, message);
                None
            }
        };

        // A missing or unknown kingdom is already in `errors`, so the
        // placeholder only lets the remaining rules run and is never returned.
        let update = SpeciesUpdate {
            scientific_name,
            common_name,
            kingdom: kingdom.unwrap_or(Kingdom::ALL[0]),
            total_population,
            image: from_editable(values.get(FIELD_IMAGE)),
            description: from_editable_text(values.get(FIELD_DESCRIPTION)),
        };

        if let Err(violations) = update.validate() {
            errors.merge(violations.into());
        }
        errors.into_result(update)
    }

    fn record_update(&self, update: &SpeciesUpdate) -> RecordUpdate {
        RecordUpdate::Species {
            id: self.id,
            fields: update.clone(),
        }
    }

    fn apply(&mut self, update: SpeciesUpdate) {
        self.scientific_name = update.scientific_name;
        self.common_name = update.common_name;
        self.kingdom = update.kingdom;
        self.total_population = update.total_population;
        self.image = update.image;
        self.description = update.description;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{CODE_INVALID, CODE_REQUIRED};
    use uuid::Uuid;

    fn red_fox() -> Species {
        Species {
            id: 1,
            scientific_name: Some("Vulpes vulpes".into()),
            common_name: Some("Red Fox".into()),
            kingdom: Kingdom::Animalia,
            total_population: None,
            description: None,
            image: None,
            author: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_prefill_coerces_nulls_to_empty() {
        let values = red_fox().prefill();
        assert_eq!(values.get(FIELD_SCIENTIFIC_NAME), "Vulpes vulpes");
        assert_eq!(values.get(FIELD_COMMON_NAME), "Red Fox");
        assert_eq!(values.get(FIELD_KINGDOM), "Animalia");
        assert_eq!(values.get(FIELD_TOTAL_POPULATION), "");
        assert_eq!(values.get(FIELD_IMAGE), "");
        assert_eq!(values.get(FIELD_DESCRIPTION), "");
    }

    #[test]
    fn test_unchanged_prefill_parses_back_to_same_values() {
        let fox = red_fox();
        let update = fox
            .parse_form(&fox.prefill(), &NameRequirement::Strict)
            .expect("prefill of a valid record must be valid");
        assert_eq!(update.common_name.as_deref(), Some("Red Fox"));
        assert_eq!(update.kingdom, Kingdom::Animalia);
        assert_eq!(update.total_population, None);
        assert_eq!(update.image, None);
        assert_eq!(update.description, None);
    }

    #[test]
    fn test_population_text_is_coerced() {
        let fox = red_fox();
        let values = fox.prefill().with(FIELD_TOTAL_POPULATION, "5000");
        let update = fox.parse_form(&values, &NameRequirement::Strict).unwrap();
        assert_eq!(update.total_population, Some(5000));
    }

    #[test]
    fn test_negative_population_rejected() {
        let fox = red_fox();
        let values = fox.prefill().with(FIELD_TOTAL_POPULATION, "-1");
        let errors = fox
            .parse_form(&values, &NameRequirement::Strict)
            .unwrap_err();
        assert_eq!(errors.for_field(FIELD_TOTAL_POPULATION).count(), 1);
        assert!(!errors.has_missing_required());
    }

    #[test]
    fn test_non_numeric_population_rejected() {
        let fox = red_fox();
        let values = fox.prefill().with(FIELD_TOTAL_POPULATION, "many");
        let errors = fox
            .parse_form(&values, &NameRequirement::Strict)
            .unwrap_err();
        let err = errors.for_field(FIELD_TOTAL_POPULATION).next().unwrap();
        assert_eq!(err.code, CODE_INVALID);
    }

    #[test]
    fn test_strict_rule_requires_both_names() {
        let fox = red_fox();
        let values = fox
            .prefill()
            .with(FIELD_SCIENTIFIC_NAME, "  ")
            .with(FIELD_COMMON_NAME, "");
        let errors = fox
            .parse_form(&values, &NameRequirement::Strict)
            .unwrap_err();
        assert!(errors.has_missing_required());
        assert_eq!(errors.for_field(FIELD_SCIENTIFIC_NAME).count(), 1);
        assert_eq!(errors.for_field(FIELD_COMMON_NAME).count(), 1);
    }

    #[test]
    fn test_lenient_rule_accepts_blank_names() {
        let fox = red_fox();
        let values = fox.prefill().with(FIELD_COMMON_NAME, "");
        let update = fox
            .parse_form(&values, &NameRequirement::Lenient)
            .unwrap();
        assert_eq!(update.common_name, None);
    }

    #[test]
    fn test_kingdom_outside_enumeration_rejected() {
        let fox = red_fox();
        let values = fox.prefill().with(FIELD_KINGDOM, "Chromista");
        let errors = fox
            .parse_form(&values, &NameRequirement::Strict)
            .unwrap_err();
        let err = errors.for_field(FIELD_KINGDOM).next().unwrap();
        assert_eq!(err.code, CODE_INVALID);
    }

    #[test]
    fn test_blank_kingdom_is_required() {
        let fox = red_fox();
        let values = fox.prefill().with(FIELD_KINGDOM, "");
        let errors = fox
            .parse_form(&values, &NameRequirement::Strict)
            .unwrap_err();
        let err = errors.for_field(FIELD_KINGDOM).next().unwrap();
        assert_eq!(err.code, CODE_REQUIRED);
    }

    #[test]
    fn test_invalid_image_url_rejected() {
        let fox = red_fox();
        let values = fox.prefill().with(FIELD_IMAGE, "not a url");
        let errors = fox
            .parse_form(&values, &NameRequirement::Strict)
            .unwrap_err();
        assert_eq!(errors.for_field(FIELD_IMAGE).count(), 1);
    }

    #[test]
    fn test_whitespace_description_becomes_absent() {
        let fox = red_fox();
        let values = fox.prefill().with(FIELD_DESCRIPTION, "   \n ");
        let update = fox.parse_form(&values, &NameRequirement::Strict).unwrap();
        assert_eq!(update.description, None);
    }

    #[test]
    fn test_description_is_stored_as_entered() {
        let fox = red_fox();
        let values = fox
            .prefill()
            .with(FIELD_DESCRIPTION, "  Hunts at dusk.\n\nLives in dens. ");
        let update = fox.parse_form(&values, &NameRequirement::Strict).unwrap();
        assert_eq!(
            update.description.as_deref(),
            Some("  Hunts at dusk.\n\nLives in dens. ")
        );
    }

    #[test]
    fn test_bad_kingdom_still_reports_other_fields() {
        let fox = red_fox();
        let values = fox
            .prefill()
            .with(FIELD_KINGDOM, "Chromista")
            .with(FIELD_IMAGE, "not a url")
            .with(FIELD_TOTAL_POPULATION, "-4");
        let errors = fox
            .parse_form(&values, &NameRequirement::Strict)
            .unwrap_err();
        assert_eq!(errors.for_field(FIELD_KINGDOM).count(), 1);
        assert_eq!(errors.for_field(FIELD_IMAGE).count(), 1);
        assert_eq!(errors.for_field(FIELD_TOTAL_POPULATION).count(), 1);
    }

    #[test]
    fn test_record_update_excludes_owner() {
        let fox = red_fox();
        let update = fox.parse_form(&fox.prefill(), &NameRequirement::Strict).unwrap();
        let record = fox.record_update(&update);
        let map = record.field_map();
        assert!(!map.contains_key("author"));
        assert!(!map.contains_key("id"));
        assert_eq!(map.len(), 6);
    }

    #[test]
    fn test_apply_keeps_id_and_author() {
        let mut fox = red_fox();
        let author = fox.author;
        let values = fox
            .prefill()
            .with(FIELD_COMMON_NAME, "Arctic Fox")
            .with(FIELD_SCIENTIFIC_NAME, "Vulpes lagopus");
        let update = fox.parse_form(&values, &NameRequirement::Strict).unwrap();
        fox.apply(update);
        assert_eq!(fox.id, 1);
        assert_eq!(fox.author, author);
        assert_eq!(fox.common_name.as_deref(), Some("Arctic Fox"));
    }

    #[test]
    fn test_name_requirement_parses() {
        assert_eq!("strict".parse::<NameRequirement>().unwrap(), NameRequirement::Strict);
        assert_eq!(" Lenient ".parse::<NameRequirement>().unwrap(), NameRequirement::Lenient);
        assert!("loose".parse::<NameRequirement>().is_err());
    }
}
