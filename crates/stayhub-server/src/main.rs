mod config;

use std::collections::HashSet;
use std::process::ExitCode;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use stayhub_adapters::events::TracingEventPublisher;
use stayhub_adapters::rest::RestClient;
use stayhub_app::apartment_service::ApartmentService;
use stayhub_app::booking_service::BookingService;
use stayhub_app::error::AppError;
use stayhub_core::apartment::ApartmentFilter;
use stayhub_core::booking::StayDates;
use stayhub_core::error::DomainError;
use stayhub_core::ids::{ApartmentId, BookingId};
use stayhub_ports::error::PortError;

use config::{Config, ConfigError};

const USAGE: &str = "usage:
  stayhub-server check <apartment-id> <check-in> <check-out> [<rescheduled-booking-id>]
  stayhub-server calendar <apartment-id> <from> [<days, 1-366>]
  stayhub-server listings [<max-price>]";

const DEFAULT_CALENDAR_DAYS: usize = 30;
const MAX_CALENDAR_DAYS: usize = 366;

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Port(#[from] PortError),
    #[error(transparent)]
    App(#[from] AppError),
}

#[derive(Debug, PartialEq)]
enum Command {
    Check {
        apartment_id: ApartmentId,
        stay: StayDates,
        excluding: Option<BookingId>,
    },
    Calendar {
        apartment_id: ApartmentId,
        from: NaiveDate,
        days: usize,
    },
    Listings {
        max_price: Option<f64>,
    },
}

fn parse_date(s: &str) -> Result<NaiveDate, CliError> {
    s.parse()
        .map_err(|_| CliError::Usage(format!("invalid date {s:?}, expected YYYY-MM-DD")))
}

fn parse_number<T: std::str::FromStr>(what: &str, s: &str) -> Result<T, CliError> {
    s.parse()
        .map_err(|_| CliError::Usage(format!("invalid {what} {s:?}")))
}

fn parse_days(s: &str) -> Result<usize, CliError> {
    let days: usize = parse_number("day count", s)?;
    if !(1..=MAX_CALENDAR_DAYS).contains(&days) {
        return Err(CliError::Usage(format!(
            "day count must be between 1 and {MAX_CALENDAR_DAYS}, got {days}"
        )));
    }
    Ok(days)
}

impl Command {
    fn parse(args: &[String]) -> Result<Self, CliError> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        match args.as_slice() {
            ["check", apartment, check_in, check_out, rest @ ..] if rest.len() <= 1 => {
                Ok(Self::Check {
                    apartment_id: apartment.parse::<ApartmentId>()?,
                    // Equal or inverted ranges are refused before any lookup.
                    stay: StayDates::new(parse_date(check_in)?, parse_date(check_out)?)?,
                    excluding: rest.first().map(|id| id.parse::<BookingId>()).transpose()?,
                })
            }
            ["calendar", apartment, from, rest @ ..] if rest.len() <= 1 => Ok(Self::Calendar {
                apartment_id: apartment.parse::<ApartmentId>()?,
                from: parse_date(from)?,
                days: match rest.first() {
                    Some(days) => parse_days(days)?,
                    None => DEFAULT_CALENDAR_DAYS,
                },
            }),
            ["listings"] => Ok(Self::Listings { max_price: None }),
            ["listings", max] => Ok(Self::Listings {
                max_price: Some(parse_number("price", max)?),
            }),
            [] => Err(CliError::Usage("missing command".into())),
            [other, ..] => Err(CliError::Usage(format!("unknown or malformed command {other:?}"))),
        }
    }
}

async fn run(config: &Config, command: Command) -> Result<(), CliError> {
    let client = RestClient::new(&config.rest())?;

    match command {
        Command::Check {
            apartment_id,
            stay,
            excluding,
        } => {
            let bookings =
                BookingService::new(client.clone(), client, TracingEventPublisher);
            let conflict = bookings
                .find_conflict(
                    &apartment_id,
                    stay.check_in(),
                    stay.check_out(),
                    excluding.as_ref(),
                )
                .await?;
            match conflict {
                Some(blocking) => println!("unavailable: overlaps booking {blocking}"),
                None => println!("available for {} night(s)", stay.nights()),
            }
        }
        Command::Calendar {
            apartment_id,
            from,
            days,
        } => {
            let bookings =
                BookingService::new(client.clone(), client, TracingEventPublisher);
            let booked: HashSet<NaiveDate> = bookings
                .booked_days(&apartment_id, from, days)
                .await?
                .into_iter()
                .collect();
            info!(apartment_id = %apartment_id, booked = booked.len(), "calendar loaded");
            for day in from.iter_days().take(days) {
                let mark = if booked.contains(&day) { "booked" } else { "free" };
                println!("{day}  {mark}");
            }
        }
        Command::Listings { max_price } => {
            let apartments = ApartmentService::new(client);
            let filter = ApartmentFilter {
                max_price,
                ..Default::default()
            };
            for apartment in apartments.search(&filter).await? {
                println!(
                    "{}  {}  {}  ${}/night  from {}",
                    apartment.id(),
                    apartment.title(),
                    apartment.address(),
                    apartment.price(),
                    apartment.available_from()
                );
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = async {
        let command = Command::parse(&args)?;
        let config = Config::load()?;
        run(&config, command).await
    }
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage(message)) => {
            eprintln!("{message}\n{USAGE}");
            ExitCode::from(2)
        }
        Err(e) => {
            error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}
