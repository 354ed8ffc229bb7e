use chrono::NaiveDate;

use super::Apartment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BedroomFilter {
    #[default]
    Any,
    Exactly(u32),
    AtLeast(u32),
}

impl BedroomFilter {
    fn matches(self, bedrooms: u32) -> bool {
        match self {
            Self::Any => true,
            Self::Exactly(n) => bedrooms == n,
            Self::AtLeast(n) => bedrooms >= n,
        }
    }
}

/// Listing search criteria. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct ApartmentFilter {
    pub bedrooms: BedroomFilter,
    pub address: Option<String>,
    pub max_price: Option<f64>,
    /// Desired move-in day; the listing must be available on or before it.
    pub move_in: Option<NaiveDate>,
}

impl ApartmentFilter {
    pub fn matches(&self, apartment: &Apartment) -> bool {
        if !self.bedrooms.matches(apartment.bedrooms()) {
            return false;
        }
        if let Some(address) = self.address.as_deref().map(str::trim) {
            if !address.is_empty()
                && !apartment
                    .address()
                    .to_lowercase()
                    .contains(&address.to_lowercase())
            {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if apartment.price() > max {
                return false;
            }
        }
        if let Some(day) = self.move_in {
            if apartment.available_from() > day {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, apartments: Vec<Apartment>) -> Vec<Apartment> {
        apartments.into_iter().filter(|a| self.matches(a)).collect()
    }
}
