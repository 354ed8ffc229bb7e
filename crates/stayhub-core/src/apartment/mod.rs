pub mod filter;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::ApartmentId;

pub use filter::{ApartmentFilter, BedroomFilter};

const MAX_TITLE_LEN: usize = 100;
const MAX_ADDRESS_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 2000;
const MAX_AMENITIES_LEN: usize = 500;
const MAX_PRICE: f64 = 1_000_000.0;
const MAX_ROOMS: f64 = 20.0;
const MAX_AREA: u32 = 100_000;

/// Editable listing fields, validated before they reach an [`Apartment`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApartmentDraft {
    pub title: String,
    pub address: String,
    /// Nightly rate.
    pub price: f64,
    pub bedrooms: u32,
    pub bathrooms: f64,
    /// Square feet.
    pub area: u32,
    pub description: String,
    pub images: Vec<String>,
    pub available_from: NaiveDate,
    pub amenities: Vec<String>,
}

impl ApartmentDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.images.is_empty() {
            return invalid("at least one image is required");
        }
        check_text("title", &self.title, MAX_TITLE_LEN)?;
        check_text("address", &self.address, MAX_ADDRESS_LEN)?;
        if !(1.0..=MAX_PRICE).contains(&self.price) {
            return invalid("price must be between 1 and 1,000,000");
        }
        if f64::from(self.bedrooms) > MAX_ROOMS {
            return invalid("bedrooms must be at most 20");
        }
        if !(0.0..=MAX_ROOMS).contains(&self.bathrooms) {
            return invalid("bathrooms must be between 0 and 20");
        }
        if !(1..=MAX_AREA).contains(&self.area) {
            return invalid("area must be between 1 and 100,000 sqft");
        }
        check_text("description", &self.description, MAX_DESCRIPTION_LEN)?;
        if self.amenities_text().chars().count() > MAX_AMENITIES_LEN {
            return invalid("amenities must be less than 500 characters");
        }
        Ok(())
    }

    fn amenities_text(&self) -> String {
        self.amenities.join(", ")
    }

    fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.address = self.address.trim().to_string();
        self.description = self.description.trim().to_string();
        self.amenities = self
            .amenities
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        self
    }
}

fn check_text(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    let len = value.trim().chars().count();
    if len == 0 {
        return Err(DomainError::InvalidApartment(format!("{field} is required")));
    }
    if len > max {
        return Err(DomainError::InvalidApartment(format!(
            "{field} must be less than {max} characters"
        )));
    }
    Ok(())
}

fn invalid(message: &str) -> Result<(), DomainError> {
    Err(DomainError::InvalidApartment(message.into()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apartment {
    id: ApartmentId,
    #[serde(flatten)]
    details: ApartmentDraft,
}

impl Apartment {
    pub fn new(draft: ApartmentDraft) -> Result<Self, DomainError> {
        draft.validate()?;
        Ok(Self {
            id: ApartmentId::new(),
            details: draft.normalized(),
        })
    }

    /// Rebuilds a listing received from the apartment service without re-validating it.
    pub fn restore(id: ApartmentId, details: ApartmentDraft) -> Self {
        Self { id, details }
    }

    pub fn update(&mut self, draft: ApartmentDraft) -> Result<(), DomainError> {
        draft.validate()?;
        self.details = draft.normalized();
        Ok(())
    }

    pub fn id(&self) -> &ApartmentId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.details.title
    }

    pub fn address(&self) -> &str {
        &self.details.address
    }

    pub fn price(&self) -> f64 {
        self.details.price
    }

    pub fn bedrooms(&self) -> u32 {
        self.details.bedrooms
    }

    pub fn bathrooms(&self) -> f64 {
        self.details.bathrooms
    }

    pub fn area(&self) -> u32 {
        self.details.area
    }

    pub fn description(&self) -> &str {
        &self.details.description
    }

    pub fn images(&self) -> &[String] {
        &self.details.images
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.details.images.first().map(String::as_str)
    }

    pub fn available_from(&self) -> NaiveDate {
        self.details.available_from
    }

    pub fn amenities(&self) -> &[String] {
        &self.details.amenities
    }

    pub fn details(&self) -> &ApartmentDraft {
        &self.details
    }
}
