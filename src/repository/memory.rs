//! In-process store used by tests and local runs without a database.

use super::{CampRepository, RepoResult};
use crate::error::RepositoryError;
use crate::model::{Camp, Speaker, Talk};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    camps: BTreeMap<i32, Camp>,
    /// Talks are stored without their speaker; (talk, speaker_id).
    talks: BTreeMap<i32, (Talk, i32)>,
    speakers: BTreeMap<i32, Speaker>,
    next_camp_id: i32,
    next_talk_id: i32,
}

impl Tables {
    fn camp_id_for(&self, moniker: &str) -> Option<i32> {
        self.camps.values().find(|c| c.moniker == moniker).map(|c| c.camp_id)
    }

    fn hydrate_talk(&self, talk: &Talk, speaker_id: i32, include_speakers: bool) -> Talk {
        let mut out = talk.clone();
        out.speaker = if include_speakers {
            self.speakers.get(&speaker_id).cloned()
        } else {
            None
        };
        out
    }

    fn hydrate_camp(&self, camp: &Camp, include_talks: bool) -> Camp {
        let mut out = camp.clone();
        out.talks = if include_talks {
            self.talks
                .values()
                .filter(|(t, _)| t.camp_id == camp.camp_id)
                .map(|(t, sid)| self.hydrate_talk(t, *sid, true))
                .collect()
        } else {
            Vec::new()
        };
        out
    }
}

/// Thread-safe map-backed [`CampRepository`].
///
/// `fail_requests` makes every call return [`RepositoryError::Unavailable`];
/// `decline_writes` makes every write report that nothing was saved.
#[derive(Default)]
pub struct MemoryCampRepository {
    tables: RwLock<Tables>,
    fail_requests: AtomicBool,
    decline_writes: AtomicBool,
}

impl MemoryCampRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a speaker; speakers are read-only through the API.
    pub fn insert_speaker(&self, speaker: Speaker) -> RepoResult<()> {
        let mut t = self.write()?;
        t.speakers.insert(speaker.speaker_id, speaker);
        Ok(())
    }

    pub fn set_fail_requests(&self, fail: bool) {
        self.fail_requests.store(fail, Ordering::SeqCst);
    }

    pub fn set_decline_writes(&self, decline: bool) {
        self.decline_writes.store(decline, Ordering::SeqCst);
    }

    fn check(&self) -> RepoResult<()> {
        if self.fail_requests.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("memory store configured to fail".into()));
        }
        Ok(())
    }

    fn declines(&self) -> bool {
        self.decline_writes.load(Ordering::SeqCst)
    }

    fn read(&self) -> RepoResult<RwLockReadGuard<'_, Tables>> {
        self.check()?;
        self.tables
            .read()
            .map_err(|_| RepositoryError::Unavailable("memory store lock poisoned".into()))
    }

    fn write(&self) -> RepoResult<RwLockWriteGuard<'_, Tables>> {
        self.check()?;
        self.tables
            .write()
            .map_err(|_| RepositoryError::Unavailable("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl CampRepository for MemoryCampRepository {
    async fn ping(&self) -> RepoResult<()> {
        self.read().map(|_| ())
    }

    async fn all_camps(&self, include_talks: bool) -> RepoResult<Vec<Camp>> {
        let t = self.read()?;
        Ok(t.camps.values().map(|c| t.hydrate_camp(c, include_talks)).collect())
    }

    async fn camps_by_event_date(&self, event_date: NaiveDate, include_talks: bool) -> RepoResult<Vec<Camp>> {
        let t = self.read()?;
        Ok(t.camps
            .values()
            .filter(|c| c.event_date == event_date)
            .map(|c| t.hydrate_camp(c, include_talks))
            .collect())
    }

    async fn camp(&self, moniker: &str, include_talks: bool) -> RepoResult<Option<Camp>> {
        let t = self.read()?;
        Ok(t.camps
            .values()
            .find(|c| c.moniker == moniker)
            .map(|c| t.hydrate_camp(c, include_talks)))
    }

    async fn add_camp(&self, camp: &Camp) -> RepoResult<Option<Camp>> {
        let mut t = self.write()?;
        if self.declines() || t.camp_id_for(&camp.moniker).is_some() {
            return Ok(None);
        }
        t.next_camp_id += 1;
        let mut stored = camp.clone();
        stored.camp_id = t.next_camp_id;
        stored.talks = Vec::new();
        t.camps.insert(stored.camp_id, stored.clone());
        Ok(Some(stored))
    }

    async fn update_camp(&self, camp: &Camp) -> RepoResult<Option<Camp>> {
        let mut t = self.write()?;
        if self.declines() {
            return Ok(None);
        }
        let Some(existing) = t.camps.get_mut(&camp.camp_id) else {
            return Ok(None);
        };
        existing.name = camp.name.clone();
        existing.event_date = camp.event_date;
        existing.length = camp.length;
        existing.location = camp.location.clone();
        Ok(Some(existing.clone()))
    }

    async fn delete_camp(&self, camp_id: i32) -> RepoResult<bool> {
        let mut t = self.write()?;
        if self.declines() || t.camps.remove(&camp_id).is_none() {
            return Ok(false);
        }
        t.talks.retain(|_, (talk, _)| talk.camp_id != camp_id);
        Ok(true)
    }

    async fn talks_by_moniker(&self, moniker: &str, include_speakers: bool) -> RepoResult<Vec<Talk>> {
        let t = self.read()?;
        let Some(camp_id) = t.camp_id_for(moniker) else {
            return Ok(Vec::new());
        };
        Ok(t.talks
            .values()
            .filter(|(talk, _)| talk.camp_id == camp_id)
            .map(|(talk, sid)| t.hydrate_talk(talk, *sid, include_speakers))
            .collect())
    }

    async fn talk_by_moniker(&self, moniker: &str, talk_id: i32, include_speakers: bool) -> RepoResult<Option<Talk>> {
        let t = self.read()?;
        let Some(camp_id) = t.camp_id_for(moniker) else {
            return Ok(None);
        };
        Ok(t.talks
            .get(&talk_id)
            .filter(|(talk, _)| talk.camp_id == camp_id)
            .map(|(talk, sid)| t.hydrate_talk(talk, *sid, include_speakers)))
    }

    async fn speaker(&self, speaker_id: i32) -> RepoResult<Option<Speaker>> {
        let t = self.read()?;
        Ok(t.speakers.get(&speaker_id).cloned())
    }

    async fn add_talk(&self, talk: &Talk) -> RepoResult<Option<Talk>> {
        let mut t = self.write()?;
        let Some(speaker_id) = talk.speaker.as_ref().map(|s| s.speaker_id) else {
            return Ok(None);
        };
        if self.declines() || !t.camps.contains_key(&talk.camp_id) || !t.speakers.contains_key(&speaker_id) {
            return Ok(None);
        }
        t.next_talk_id += 1;
        let mut stored = talk.clone();
        stored.talk_id = t.next_talk_id;
        stored.speaker = None;
        t.talks.insert(stored.talk_id, (stored.clone(), speaker_id));
        Ok(Some(t.hydrate_talk(&stored, speaker_id, true)))
    }

    async fn update_talk(&self, talk: &Talk) -> RepoResult<Option<Talk>> {
        let mut t = self.write()?;
        if self.declines() {
            return Ok(None);
        }
        let speaker_id = match talk.speaker.as_ref() {
            Some(s) if t.speakers.contains_key(&s.speaker_id) => Some(s.speaker_id),
            Some(_) => return Ok(None),
            None => None,
        };
        let Some((existing, sid)) = t.talks.get_mut(&talk.talk_id) else {
            return Ok(None);
        };
        existing.title = talk.title.clone();
        existing.abstract_ = talk.abstract_.clone();
        existing.level = talk.level;
        if let Some(speaker_id) = speaker_id {
            *sid = speaker_id;
        }
        let (stored, sid) = (existing.clone(), *sid);
        Ok(Some(t.hydrate_talk(&stored, sid, true)))
    }

    async fn delete_talk(&self, talk_id: i32) -> RepoResult<bool> {
        let mut t = self.write()?;
        if self.declines() {
            return Ok(false);
        }
        Ok(t.talks.remove(&talk_id).is_some())
    }
}
