//! Date availability for a single apartment.
//!
//! Every stay is the half-open interval `[check_in, check_out)`: the guest
//! sleeps there on the nights `check_in ..= check_out - 1`, and the check-out
//! day is free for the next arrival (turnover day). All functions here are
//! pure: they look only at the bookings they are handed, which callers fetch
//! fresh from the booking service before each decision.

use chrono::{DateTime, NaiveDate, TimeZone};

use crate::booking::Booking;
use crate::ids::{ApartmentId, BookingId};

/// Truncates a timestamp to its calendar day in the timestamp's own zone.
pub fn day_of<Tz: TimeZone>(at: &DateTime<Tz>) -> NaiveDate {
    at.date_naive()
}

/// Two half-open intervals `[a_start, a_end)` and `[b_start, b_end)` overlap
/// iff `a_start < b_end && b_start < a_end`.
pub fn overlaps(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Narrows `bookings` to the ones that hold dates on `apartment_id`,
/// leaving out `excluding` (the booking being rescheduled, if any).
pub fn active_bookings<'a, I>(
    bookings: I,
    apartment_id: &ApartmentId,
    excluding: Option<&BookingId>,
) -> Vec<&'a Booking>
where
    I: IntoIterator<Item = &'a Booking>,
{
    bookings
        .into_iter()
        .filter(|b| b.apartment_id() == apartment_id)
        .filter(|b| b.is_active())
        .filter(|b| excluding.map_or(true, |id| b.id() != id))
        .collect()
}

/// True if some booking occupies the night of `date`.
///
/// The check-out day of a booking is not booked. Cancelled bookings are
/// ignored even if the caller passes them in.
pub fn is_date_booked<'a, I>(date: NaiveDate, active: I) -> bool
where
    I: IntoIterator<Item = &'a Booking>,
{
    active
        .into_iter()
        .filter(|b| b.is_active())
        .any(|b| date >= b.check_in() && date < b.check_out())
}

/// True if `[check_in, check_out)` overlaps any active booking.
///
/// The range is not validated: an empty or inverted candidate is fed to the
/// overlap formula unchanged. Callers reject `check_out <= check_in` first.
pub fn has_conflict<'a, I>(check_in: NaiveDate, check_out: NaiveDate, active: I) -> bool
where
    I: IntoIterator<Item = &'a Booking>,
{
    first_conflict(check_in, check_out, active).is_some()
}

/// The first booking that overlaps `[check_in, check_out)`, if any.
pub fn first_conflict<'a, I>(
    check_in: NaiveDate,
    check_out: NaiveDate,
    active: I,
) -> Option<&'a Booking>
where
    I: IntoIterator<Item = &'a Booking>,
{
    active
        .into_iter()
        .filter(|b| b.is_active())
        .find(|b| overlaps(check_in, check_out, b.check_in(), b.check_out()))
}

/// The booked days among the `days` consecutive days starting at `from`.
pub fn booked_days<'a, I>(from: NaiveDate, days: usize, active: I) -> Vec<NaiveDate>
where
    I: IntoIterator<Item = &'a Booking>,
{
    let active: Vec<&Booking> = active.into_iter().collect();
    from.iter_days()
        .take(days)
        .filter(|day| is_date_booked(*day, active.iter().copied()))
        .collect()
}
