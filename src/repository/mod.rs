//! Data access for camps, talks and speakers.
//!
//! Write operations distinguish a store error (`Err`) from a write the store
//! declined to perform (`Ok(None)` / `Ok(false)`): a moniker that lost a race
//! to another insert, a row that vanished between lookup and update.

mod memory;
mod postgres;

pub use memory::MemoryCampRepository;
pub use postgres::PgCampRepository;

use crate::error::RepositoryError;
use crate::model::{Camp, Speaker, Talk};
use async_trait::async_trait;
use chrono::NaiveDate;

pub type RepoResult<T> = Result<T, RepositoryError>;

#[async_trait]
pub trait CampRepository: Send + Sync {
    /// Cheap connectivity check for readiness probes.
    async fn ping(&self) -> RepoResult<()>;

    async fn all_camps(&self, include_talks: bool) -> RepoResult<Vec<Camp>>;

    async fn camps_by_event_date(&self, event_date: NaiveDate, include_talks: bool) -> RepoResult<Vec<Camp>>;

    async fn camp(&self, moniker: &str, include_talks: bool) -> RepoResult<Option<Camp>>;

    /// Insert a camp; `None` when a camp with the same moniker already exists.
    async fn add_camp(&self, camp: &Camp) -> RepoResult<Option<Camp>>;

    /// Overwrite the camp with `camp.camp_id`; `None` when it no longer exists.
    async fn update_camp(&self, camp: &Camp) -> RepoResult<Option<Camp>>;

    /// Delete a camp and its talks.
    async fn delete_camp(&self, camp_id: i32) -> RepoResult<bool>;

    async fn talks_by_moniker(&self, moniker: &str, include_speakers: bool) -> RepoResult<Vec<Talk>>;

    async fn talk_by_moniker(&self, moniker: &str, talk_id: i32, include_speakers: bool) -> RepoResult<Option<Talk>>;

    async fn speaker(&self, speaker_id: i32) -> RepoResult<Option<Speaker>>;

    /// Insert a talk under `talk.camp_id` with `talk.speaker`; `None` when the camp or speaker is gone.
    async fn add_talk(&self, talk: &Talk) -> RepoResult<Option<Talk>>;

    async fn update_talk(&self, talk: &Talk) -> RepoResult<Option<Talk>>;

    async fn delete_talk(&self, talk_id: i32) -> RepoResult<bool>;
}
