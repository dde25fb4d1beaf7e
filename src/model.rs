//! Entities as the repository hands them out, and the wire models clients see.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Physical venue of a camp. Owned by exactly one camp.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    pub venue_name: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub city_town: Option<String>,
    pub state_province: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Camp {
    /// Store-assigned key; zero until persisted.
    pub camp_id: i32,
    pub name: String,
    pub moniker: String,
    pub event_date: NaiveDate,
    pub length: i32,
    pub location: Location,
    /// Only populated when the caller asked for talks.
    pub talks: Vec<Talk>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Talk {
    /// Store-assigned key; zero until persisted.
    pub talk_id: i32,
    pub camp_id: i32,
    pub title: String,
    pub abstract_: String,
    pub level: i32,
    /// `None` only when the talk was loaded without its speaker.
    pub speaker: Option<Speaker>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Speaker {
    pub speaker_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub company: Option<String>,
    pub company_url: Option<String>,
    pub blog_url: Option<String>,
    pub twitter: Option<String>,
    pub github: Option<String>,
}

/// Camp on the wire. Location fields are flattened; store keys are not exposed.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampModel {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub moniker: String,
    #[schema(value_type = String, format = Date)]
    pub event_date: Option<NaiveDate>,
    #[serde(default = "default_length")]
    pub length: i32,
    pub venue: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub city_town: Option<String>,
    pub state_province: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    #[serde(default)]
    pub talks: Vec<TalkModel>,
}

fn default_length() -> i32 {
    1
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TalkModel {
    #[serde(default)]
    pub talk_id: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "abstract")]
    pub abstract_: String,
    #[serde(default)]
    pub level: i32,
    pub speaker: Option<SpeakerModel>,
}

/// Speaker on the wire. On input only `speakerId` is read.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerModel {
    pub speaker_id: Option<i32>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub middle_name: Option<String>,
    pub company: Option<String>,
    pub company_url: Option<String>,
    pub blog_url: Option<String>,
    pub twitter: Option<String>,
    #[serde(rename = "gitHub")]
    pub github: Option<String>,
}

impl TalkModel {
    /// Speaker id named by the request, if any.
    pub fn speaker_id(&self) -> Option<i32> {
        self.speaker.as_ref().and_then(|s| s.speaker_id)
    }
}
