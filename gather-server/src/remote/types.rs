//! Request and response payloads of the remote meetup functions.

use serde::{Deserialize, Serialize};

use crate::domain::{Category, Meetup};

/// Function creating a meetup.
pub const CREATE_MEETUP: &str = "onCreateGather";
/// Function updating a participant's entry in a meetup.
pub const UPDATE_MEETUP: &str = "onUpdateGather";
/// Function recomputing a shared meetup.
pub const REFRESH_MEETUP: &str = "onRefrectGather";
/// Function registering a push token for the current user.
pub const UPDATE_USER: &str = "onUpdateUser";

/// Category as sent when creating a meetup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetupCategory {
    pub title: String,
    pub icon: Option<String>,
    pub station_names: Vec<String>,
}

impl From<&Category> for MeetupCategory {
    fn from(category: &Category) -> Self {
        Self {
            title: category.title.clone(),
            icon: category.icon.clone(),
            station_names: category
                .stations
                .iter()
                .map(|s| s.station_name.clone())
                .collect(),
        }
    }
}

/// The caller's own participation in a meetup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRouteRequest {
    pub user_name: String,
    /// Whether the caller's origin station may be shown.
    pub visible: bool,
    /// The caller's origin station.
    pub route_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeetupRequest {
    pub category: MeetupCategory,
    /// Gradient palette for the meetup header.
    pub colors: Vec<String>,
    pub title: String,
    pub user_route: UserRouteRequest,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMeetupResponse {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeetupRequest {
    pub share_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub user_route: UserRouteRequest,
    pub visible: bool,
}

/// The updated meetup. Its timestamps may be RFC 3339 strings or
/// Firestore `{_seconds, _nanoseconds}` objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateMeetupResponse {
    pub gather: Meetup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshMeetupRequest {
    pub share_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub expo_token: String,
}
