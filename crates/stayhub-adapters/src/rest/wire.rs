//! JSON shapes spoken by the external services (camelCase, string dates).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use stayhub_core::apartment::{Apartment, ApartmentDraft};
use stayhub_core::booking::{
    ApartmentSummary, Booking, BookingRecord, BookingStatus, GuestContact,
};
use stayhub_core::ids::{ApartmentId, BookingId, UserId};
use stayhub_ports::error::PortError;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Accepts `2024-01-05`, `2024-01-05T00:00:00` or any RFC 3339 timestamp.
/// Timestamps with an offset are reduced to their UTC calendar day.
pub(crate) fn parse_day(s: &str) -> Result<NaiveDate, PortError> {
    let s = s.trim();
    if let Ok(day) = NaiveDate::parse_from_str(s, DAY_FORMAT) {
        return Ok(day);
    }
    parse_timestamp(s).map(|at| at.date_naive())
}

pub(crate) fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, PortError> {
    let s = s.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(s) {
        return Ok(at.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| PortError::Decode(format!("invalid date: {s:?}")))
}

pub(crate) fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

fn decode<T>(
    field: &str,
    value: &str,
    parse: impl FnOnce(&str) -> Result<T, stayhub_core::error::DomainError>,
) -> Result<T, PortError> {
    parse(value).map_err(|e| PortError::Decode(format!("{field}: {e}")))
}

/// Descriptive fields: a bad value is logged and dropped, never fatal.
fn decode_optional<T, E: std::fmt::Display>(
    booking_id: &str,
    field: &str,
    value: Option<&str>,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> Option<T> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    match parse(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!(booking_id, field, error = %e, "ignoring malformed booking field");
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookingDto {
    pub id: String,
    pub apartment_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub apartment_title: String,
    #[serde(default)]
    pub apartment_image: Option<String>,
    #[serde(default)]
    pub apartment_address: String,
    #[serde(default)]
    pub apartment_price: f64,
    pub check_in: String,
    pub check_out: String,
    #[serde(default = "one")]
    pub guests: u32,
    #[serde(default)]
    pub nights: u32,
    #[serde(default)]
    pub total_price: f64,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

fn one() -> u32 {
    1
}

impl TryFrom<BookingDto> for Booking {
    type Error = PortError;

    /// Identity, dates and status are strict; everything else is best effort.
    fn try_from(dto: BookingDto) -> Result<Self, Self::Error> {
        let status = BookingStatus::parse(&dto.status)
            .ok_or_else(|| PortError::Decode(format!("unknown booking status {:?}", dto.status)))?;
        let guest_id = decode_optional(&dto.id, "userId", dto.user_id.as_deref(), UserId::parse);
        let created_at =
            decode_optional(&dto.id, "createdAt", dto.created_at.as_deref(), parse_timestamp);
        Ok(Booking::from(BookingRecord {
            id: decode("id", &dto.id, BookingId::parse)?,
            apartment_id: decode("apartmentId", &dto.apartment_id, ApartmentId::parse)?,
            guest_id,
            apartment: ApartmentSummary {
                title: dto.apartment_title,
                address: dto.apartment_address,
                image: dto.apartment_image,
                nightly_price: dto.apartment_price,
            },
            contact: GuestContact {
                name: dto.user_name,
                email: dto.user_email,
                phone: dto.user_phone,
            },
            check_in: parse_day(&dto.check_in)?,
            check_out: parse_day(&dto.check_out)?,
            guests: dto.guests,
            nights: dto.nights,
            total_price: dto.total_price,
            status,
            created_at,
            cancel_reason: dto.cancel_reason,
        }))
    }
}

impl From<&Booking> for BookingDto {
    fn from(b: &Booking) -> Self {
        Self {
            id: b.id().to_string(),
            apartment_id: b.apartment_id().to_string(),
            user_id: b.guest_id().map(ToString::to_string),
            apartment_title: b.apartment().title.clone(),
            apartment_image: b.apartment().image.clone(),
            apartment_address: b.apartment().address.clone(),
            apartment_price: b.apartment().nightly_price,
            check_in: format_day(b.check_in()),
            check_out: format_day(b.check_out()),
            guests: b.guests(),
            nights: b.nights(),
            total_price: b.total_price(),
            status: b.status().as_str().to_string(),
            created_at: b.created_at().map(|at| at.to_rfc3339()),
            cancel_reason: b.cancel_reason().map(str::to_string),
            user_name: b.contact().name.clone(),
            user_phone: b.contact().phone.clone(),
            user_email: b.contact().email.clone(),
        }
    }
}

/// Body of `POST /api/bookings/{id}/reschedule`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RescheduleDto {
    pub check_in: String,
    pub check_out: String,
    pub nights: u32,
    pub total_price: f64,
}

impl From<&Booking> for RescheduleDto {
    fn from(b: &Booking) -> Self {
        Self {
            check_in: format_day(b.check_in()),
            check_out: format_day(b.check_out()),
            nights: b.nights(),
            total_price: b.total_price(),
        }
    }
}

/// Body of `POST /api/bookings/{id}/cancel`.
#[derive(Debug, Serialize)]
pub(crate) struct CancelDto<'a> {
    #[serde(rename = "CancelReason")]
    pub cancel_reason: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApartmentDto {
    pub id: String,
    pub title: String,
    pub address: String,
    pub price: f64,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub area: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub available_from: String,
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl TryFrom<ApartmentDto> for Apartment {
    type Error = PortError;

    fn try_from(dto: ApartmentDto) -> Result<Self, Self::Error> {
        let id = decode("id", &dto.id, ApartmentId::parse)?;
        Ok(Apartment::restore(
            id,
            ApartmentDraft {
                title: dto.title,
                address: dto.address,
                price: dto.price,
                bedrooms: dto.bedrooms,
                bathrooms: dto.bathrooms,
                area: dto.area,
                description: dto.description,
                images: dto.images,
                available_from: parse_day(&dto.available_from)?,
                amenities: dto.amenities,
            },
        ))
    }
}

impl From<&Apartment> for ApartmentDto {
    fn from(a: &Apartment) -> Self {
        Self {
            id: a.id().to_string(),
            title: a.title().to_string(),
            address: a.address().to_string(),
            price: a.price(),
            bedrooms: a.bedrooms(),
            bathrooms: a.bathrooms(),
            area: a.area(),
            description: a.description().to_string(),
            images: a.images().to_vec(),
            available_from: format_day(a.available_from()),
            amenities: a.amenities().to_vec(),
        }
    }
}
