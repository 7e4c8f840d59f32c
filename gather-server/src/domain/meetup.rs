//! Shared meetups and per-participant routes.
//!
//! A meetup pairs a [`VisibleCategory`] of candidate stations with the
//! routes each participant reported to those stations. The
//! [`Meetup::arrival_summary`] view regroups the routes per candidate
//! station for comparison.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::VisibleCategory;

/// One participant's trip to a candidate station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    pub station_from: String,
    pub station_to: String,
    pub transfer_count: u32,
    /// Ride time in minutes.
    pub ride_time: u32,
}

/// A participant and the routes they reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRoute {
    pub user_id: String,
    pub user_name: String,
    /// Whether this participant allows their origin station to be shown.
    pub visible: bool,
    pub routes: Vec<RouteLeg>,
}

/// A shared meetup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meetup {
    pub id: String,
    pub owner_id: String,
    pub share_id: String,
    pub user_id: String,
    pub category: VisibleCategory,
    pub colors: Vec<String>,
    pub title: String,
    pub user_routes: Vec<UserRoute>,
    /// Whether origin stations are shown at all.
    pub visible: bool,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub updated_time: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_time: DateTime<Utc>,
}

/// Timestamps arrive either as RFC 3339 strings or as Firestore
/// `{seconds, nanoseconds}` objects (`_seconds`/`_nanoseconds` when
/// serialized by the admin SDK). They are always written as RFC 3339.
mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Text(DateTime<Utc>),
        Parts {
            #[serde(alias = "_seconds")]
            seconds: i64,
            #[serde(alias = "_nanoseconds", default)]
            nanoseconds: u32,
        },
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        match Wire::deserialize(d)? {
            Wire::Text(time) => Ok(time),
            Wire::Parts {
                seconds,
                nanoseconds,
            } => DateTime::from_timestamp(seconds, nanoseconds)
                .ok_or_else(|| D::Error::custom("timestamp out of range")),
        }
    }
}

/// A participant arriving at a candidate station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrival {
    pub name: String,
    /// Origin station, present only when disclosure is allowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    pub transfer_count: u32,
    pub ride_time: u32,
}

/// All arrivals at one candidate station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalSummary {
    pub station_name: String,
    pub arrivals: Vec<Arrival>,
}

impl Meetup {
    /// Regroup participants' routes by candidate station.
    ///
    /// Stations appear in category order, arrivals in participant order.
    /// A participant with no route to a station is absent from that
    /// station's list; only their first route to it is used.
    pub fn arrival_summary(&self) -> Vec<ArrivalSummary> {
        self.category
            .station_names
            .iter()
            .map(|station_name| {
                let arrivals = self
                    .user_routes
                    .iter()
                    .filter_map(|user| {
                        let leg = user.routes.iter().find(|r| &r.station_to == station_name)?;
                        Some(Arrival {
                            name: user.user_name.clone(),
                            from: (self.visible && user.visible).then(|| leg.station_from.clone()),
                            transfer_count: leg.transfer_count,
                            ride_time: leg.ride_time,
                        })
                    })
                    .collect();

                ArrivalSummary {
                    station_name: station_name.clone(),
                    arrivals,
                }
            })
            .collect()
    }
}

/// Sort meetups most recently updated first.
pub fn sort_by_recent(meetups: &mut [Meetup]) {
    meetups.sort_by(|a, b| b.updated_time.cmp(&a.updated_time));
}
