//! Flight result rows, the details record, and the static provider that
//! stands in for a search backend.
//!
//! All display fields are opaque strings: times, durations and prices are
//! shown exactly as supplied and never parsed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::criteria::SearchCriteria;

/// Identifier of a result row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlightId(String);

impl FlightId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the results list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: FlightId,
    pub airline: String,
    pub flight_number: String,
    pub departure: String,
    pub arrival: String,
    pub duration: String,
    pub stops: String,
    pub price: String,
}

/// One direction of a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightLeg {
    pub date: String,
    /// "CODE • Airport name"
    pub from: String,
    /// "CODE • Airport name"
    pub to: String,
    pub airline: String,
    pub flight_number: String,
    pub aircraft: String,
    pub duration: String,
    pub departure_time: String,
    pub arrival_time: String,
}

impl FlightLeg {
    pub fn from_parts(&self) -> (&str, &str) {
        split_endpoint(&self.from)
    }

    pub fn to_parts(&self) -> (&str, &str) {
        split_endpoint(&self.to)
    }
}

/// Split "DXB • Dubai International Airport" into ("DXB", "Dubai International Airport").
fn split_endpoint(s: &str) -> (&str, &str) {
    match s.split_once('•') {
        Some((code, name)) => (code.trim(), name.trim()),
        None => (s.trim(), ""),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layover {
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightDetails {
    pub outbound: FlightLeg,
    pub inbound: FlightLeg,
    pub layover: Option<Layover>,
}

/// Source of result rows and details. The only implementation is static.
pub trait FlightProvider: Send {
    fn results(&self, criteria: &SearchCriteria) -> Vec<Flight>;
    fn details(&self, id: &FlightId) -> FlightDetails;
}

/// Fixed sample data. Ignores the criteria and the selected id.
#[derive(Debug, Clone, Default)]
pub struct StaticFlights;

impl FlightProvider for StaticFlights {
    fn results(&self, _criteria: &SearchCriteria) -> Vec<Flight> {
        sample_flights()
    }

    fn details(&self, _id: &FlightId) -> FlightDetails {
        sample_details()
    }
}

/// Short carrier tag shown in place of a logo.
pub fn airline_badge(airline: &str) -> &'static str {
    match airline {
        "Emirates" => "EK",
        "Lufthansa" => "LH",
        _ => "--",
    }
}

#[allow(clippy::too_many_arguments)]
fn flight(
    id: &str,
    airline: &str,
    flight_number: &str,
    departure: &str,
    arrival: &str,
    duration: &str,
    stops: &str,
    price: &str,
) -> Flight {
    Flight {
        id: FlightId::new(id),
        airline: airline.into(),
        flight_number: flight_number.into(),
        departure: departure.into(),
        arrival: arrival.into(),
        duration: duration.into(),
        stops: stops.into(),
        price: price.into(),
    }
}

pub fn sample_flights() -> Vec<Flight> {
    vec![
        flight("1", "Emirates", "AT 4324", "9:45 AM", "11:45 AM", "2h 10min", "Non stop", "AED 2,456.90"),
        flight("2", "Lufthansa", "AT 4534", "11:45 PM", "6:45 AM", "4h 10min", "2 stops", "AED 2,456.90"),
        flight("3", "Emirates", "AT 4324", "9:45 AM", "11:45 AM", "7h 10min", "1 stop", "AED 1,456.90"),
        flight("4", "Emirates", "AT 4324", "11:45 PM", "6:45 AM", "19h 10min", "1 stop", "AED 1,456.90"),
        flight("5", "Lufthansa", "AT 4324", "9:45 AM", "11:45 AM", "7h 10min", "Non stop", "AED 1,456.90"),
        flight(
            "6",
            "Lufthansa",
            "AT 4324, Indigo • 6E 783",
            "11:45 PM",
            "6:45 AM",
            "4h 10min",
            "Non stop",
            "AED 1,456.90",
        ),
    ]
}

pub fn sample_details() -> FlightDetails {
    FlightDetails {
        outbound: FlightLeg {
            date: "Sat 28 Sept".into(),
            from: "DXB • Dubai International Airport".into(),
            to: "JFK • John F. Kennedy International Airport".into(),
            airline: "Emirates".into(),
            flight_number: "EK202".into(),
            aircraft: "Economy • Boeing 777".into(),
            duration: "14h 30m".into(),
            departure_time: "2:15 PM".into(),
            arrival_time: "8:45 AM".into(),
        },
        inbound: FlightLeg {
            date: "Mon 30 Sept".into(),
            from: "JFK • John F. Kennedy International Airport".into(),
            to: "DXB • Dubai International Airport".into(),
            airline: "Emirates".into(),
            flight_number: "EK203".into(),
            aircraft: "Economy • Boeing 777".into(),
            duration: "14h 45m".into(),
            departure_time: "9:15 PM".into(),
            arrival_time: "5:00 PM".into(),
        },
        layover: Some(Layover {
            duration: "2h 30m".into(),
        }),
    }
}
