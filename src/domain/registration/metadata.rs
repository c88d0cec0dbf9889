//! The metadata document pinned next to the uploaded file.
//!
//! The `image` field only accepts a `ContentIdentifier`, so a document can only be
//! built after the file upload has produced one.

use super::{ContentIdentifier, FormVariant, RegistrationInput};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: AttributeValue,
}

impl Attribute {
    fn flag(trait_type: &str, value: bool) -> Self {
        Attribute {
            trait_type: trait_type.to_string(),
            value: AttributeValue::Bool(value),
        }
    }

    fn text(trait_type: &str, value: &str) -> Self {
        Attribute {
            trait_type: trait_type.to_string(),
            value: AttributeValue::Text(value.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataDocument {
    pub name: String,
    pub description: String,
    pub image: ContentIdentifier,
    pub attributes: Vec<Attribute>,
}

impl MetadataDocument {
    pub fn build(
        file_name: &str,
        input: &RegistrationInput,
        image: ContentIdentifier,
        variant: FormVariant,
    ) -> Self {
        let mut attributes = vec![
            Attribute::flag("Commercial Use", input.commercial_use_allowed),
            Attribute::flag("Derivatives Allowed", input.derivatives_allowed),
        ];
        match variant {
            FormVariant::Standard => {
                attributes.push(Attribute::text("Expiry", input.expiry_date().unwrap_or("")));
            }
            FormVariant::Heritage => {
                attributes.push(Attribute::text("License Duration", "1 year"));
                attributes.push(Attribute::text("Location", &input.location));
                attributes.push(Attribute::text("Custodial Community", &input.custodial_community));
                attributes.push(Attribute::text("Distribution Region", &input.distribution_region));
                attributes.push(Attribute::text("Species", &input.species));
            }
        }

        MetadataDocument {
            name: file_name.to_string(),
            description: input.description.clone(),
            image,
            attributes,
        }
    }
}
