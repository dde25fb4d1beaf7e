//! Copies between entities and wire models.

use crate::model::{Camp, CampModel, Location, Speaker, SpeakerModel, Talk, TalkModel};
use chrono::NaiveDate;

impl From<&Speaker> for SpeakerModel {
    fn from(s: &Speaker) -> Self {
        SpeakerModel {
            speaker_id: Some(s.speaker_id),
            first_name: s.first_name.clone(),
            last_name: s.last_name.clone(),
            middle_name: s.middle_name.clone(),
            company: s.company.clone(),
            company_url: s.company_url.clone(),
            blog_url: s.blog_url.clone(),
            twitter: s.twitter.clone(),
            github: s.github.clone(),
        }
    }
}

impl From<&Talk> for TalkModel {
    fn from(t: &Talk) -> Self {
        TalkModel {
            talk_id: t.talk_id,
            title: t.title.clone(),
            abstract_: t.abstract_.clone(),
            level: t.level,
            speaker: t.speaker.as_ref().map(SpeakerModel::from),
        }
    }
}

impl From<&Camp> for CampModel {
    fn from(c: &Camp) -> Self {
        CampModel {
            name: c.name.clone(),
            moniker: c.moniker.clone(),
            event_date: Some(c.event_date),
            length: c.length,
            venue: c.location.venue_name.clone(),
            address1: c.location.address1.clone(),
            address2: c.location.address2.clone(),
            address3: c.location.address3.clone(),
            city_town: c.location.city_town.clone(),
            state_province: c.location.state_province.clone(),
            postal_code: c.location.postal_code.clone(),
            country: c.location.country.clone(),
            talks: c.talks.iter().map(TalkModel::from).collect(),
        }
    }
}

pub fn camp_models(camps: &[Camp]) -> Vec<CampModel> {
    camps.iter().map(CampModel::from).collect()
}

pub fn talk_models(talks: &[Talk]) -> Vec<TalkModel> {
    talks.iter().map(TalkModel::from).collect()
}

impl CampModel {
    /// New unsaved camp. Talks in the model are not carried over; they are created through the talk routes.
    pub fn to_entity(&self) -> Camp {
        let mut camp = Camp {
            camp_id: 0,
            name: String::new(),
            moniker: self.moniker.clone(),
            event_date: NaiveDate::MIN,
            length: 0,
            location: Location::default(),
            talks: Vec::new(),
        };
        self.apply_to(&mut camp);
        camp
    }

    /// Copy every updatable field onto an existing camp. The moniker and talks are left alone.
    pub fn apply_to(&self, camp: &mut Camp) {
        camp.name = self.name.clone();
        if let Some(date) = self.event_date {
            camp.event_date = date;
        }
        camp.length = self.length;
        camp.location = Location {
            venue_name: self.venue.clone(),
            address1: self.address1.clone(),
            address2: self.address2.clone(),
            address3: self.address3.clone(),
            city_town: self.city_town.clone(),
            state_province: self.state_province.clone(),
            postal_code: self.postal_code.clone(),
            country: self.country.clone(),
        };
    }
}

impl TalkModel {
    /// New unsaved talk under `camp_id`. The speaker is attached separately once resolved.
    pub fn to_entity(&self, camp_id: i32) -> Talk {
        let mut talk = Talk {
            talk_id: 0,
            camp_id,
            title: String::new(),
            abstract_: String::new(),
            level: 0,
            speaker: None,
        };
        self.apply_to(&mut talk);
        talk
    }

    /// Copy title, abstract and level. Identity, camp and speaker are not touched.
    pub fn apply_to(&self, talk: &mut Talk) {
        talk.title = self.title.clone();
        talk.abstract_ = self.abstract_.clone();
        talk.level = self.level;
    }
}
