use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::internal::ValidationError;
use crate::types::internal::category::Category;
use crate::types::internal::patch::Patch;

/// Canonical textual form of a purchase date
pub const PURCHASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// A tracked valuable possession
///
/// Only obtainable through [`Item::new`] (validated) or from a repository,
/// and only mutated through [`Item::apply_update`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// 0 until the item has been persisted
    pub id: i64,
    pub name: String,
    pub category: Category,
    pub brand: String,
    pub purchase_price: i64,
    pub purchase_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied fields for a new item, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateItemInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub purchase_price: i64,
    #[serde(default)]
    pub purchase_date: String,
}

/// Partial update of an item
///
/// Category and purchase date are fixed at creation and cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateFields {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub brand: Patch<String>,
    #[serde(default)]
    pub purchase_price: Patch<i64>,
}

impl Item {
    /// Validate the inputs and build an unsaved item
    ///
    /// Checks run in this order, stopping at the first failing rule:
    /// required fields (all empty ones reported together), category,
    /// price sign, date.
    pub fn new(
        name: &str,
        category: &str,
        brand: &str,
        purchase_price: i64,
        purchase_date: &str,
    ) -> Result<Self, ValidationError> {
        let missing: Vec<&'static str> = [
            ("name", name),
            ("category", category),
            ("brand", brand),
            ("purchase_date", purchase_date),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let category: Category = category.parse()?;

        if purchase_price < 0 {
            return Err(ValidationError::NegativePrice(purchase_price));
        }

        let purchase_date = parse_purchase_date(purchase_date)?;

        let now = now();
        Ok(Self {
            id: 0,
            name: name.to_string(),
            category,
            brand: brand.to_string(),
            purchase_price,
            purchase_date,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn from_input(input: &CreateItemInput) -> Result<Self, ValidationError> {
        Self::new(
            &input.name,
            &input.category,
            &input.brand,
            input.purchase_price,
            &input.purchase_date,
        )
    }

    /// Merge a partial update into this item
    ///
    /// The whole patch is validated before any field is written, so on error
    /// the item is left untouched. `id` and `created_at` are never changed.
    pub fn apply_update(&mut self, fields: &UpdateFields) -> Result<(), ValidationError> {
        fields.validate()?;

        if let Patch::Value(name) = &fields.name {
            self.name = name.clone();
        }
        if let Patch::Value(brand) = &fields.brand {
            self.brand = brand.clone();
        }
        if let Patch::Value(price) = fields.purchase_price {
            self.purchase_price = price;
        }
        self.updated_at = now();

        Ok(())
    }

    /// Purchase date in `YYYY-MM-DD` form
    pub fn purchase_date_string(&self) -> String {
        self.purchase_date.format(PURCHASE_DATE_FORMAT).to_string()
    }
}

impl UpdateFields {
    /// Check the patch on its own, independent of any stored item
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::NoFieldsToUpdate);
        }

        validate_text_patch("name", &self.name)?;
        validate_text_patch("brand", &self.brand)?;

        match self.purchase_price {
            Patch::Null => Err(ValidationError::NullField("purchase_price")),
            Patch::Value(price) if price < 0 => Err(ValidationError::NegativePrice(price)),
            _ => Ok(()),
        }
    }

    /// True when the caller mentioned none of the patchable fields
    pub fn is_empty(&self) -> bool {
        self.name.is_absent() && self.brand.is_absent() && self.purchase_price.is_absent()
    }
}

fn validate_text_patch(field: &'static str, patch: &Patch<String>) -> Result<(), ValidationError> {
    match patch {
        Patch::Null => Err(ValidationError::NullField(field)),
        Patch::Value(value) if value.trim().is_empty() => Err(ValidationError::EmptyField(field)),
        _ => Ok(()),
    }
}

/// Parse a purchase date, accepting only the canonical `YYYY-MM-DD` form
pub fn parse_purchase_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let date = NaiveDate::parse_from_str(value, PURCHASE_DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))?;

    // chrono accepts unpadded fields such as 2023-1-5
    if date.format(PURCHASE_DATE_FORMAT).to_string() != value {
        return Err(ValidationError::InvalidDate(value.to_string()));
    }

    Ok(date)
}

/// Current time at the millisecond precision the stores keep
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
