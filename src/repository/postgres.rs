//! PostgreSQL-backed [`CampRepository`]. Tables live in the schema passed at construction (see `store::ensure_tables`).

use super::{CampRepository, RepoResult};
use crate::model::{Camp, Location, Speaker, Talk};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use std::collections::HashMap;

const CAMP_COLUMNS: &str = "camp_id, name, moniker, event_date, length, venue_name, address1, address2, address3, \
     city_town, state_province, postal_code, country";

const TALK_COLUMNS: &str = "t.talk_id, t.camp_id, t.title, t.abstract, t.level, s.speaker_id, s.first_name, \
     s.last_name, s.middle_name, s.company, s.company_url, s.blog_url, s.twitter, s.github";

const SPEAKER_COLUMNS: &str =
    "speaker_id, first_name, last_name, middle_name, company, company_url, blog_url, twitter, github";

#[derive(sqlx::FromRow)]
struct CampRow {
    camp_id: i32,
    name: String,
    moniker: String,
    event_date: NaiveDate,
    length: i32,
    venue_name: Option<String>,
    address1: Option<String>,
    address2: Option<String>,
    address3: Option<String>,
    city_town: Option<String>,
    state_province: Option<String>,
    postal_code: Option<String>,
    country: Option<String>,
}

impl From<CampRow> for Camp {
    fn from(r: CampRow) -> Self {
        Camp {
            camp_id: r.camp_id,
            name: r.name,
            moniker: r.moniker,
            event_date: r.event_date,
            length: r.length,
            location: Location {
                venue_name: r.venue_name,
                address1: r.address1,
                address2: r.address2,
                address3: r.address3,
                city_town: r.city_town,
                state_province: r.state_province,
                postal_code: r.postal_code,
                country: r.country,
            },
            talks: Vec::new(),
        }
    }
}

#[derive(sqlx::FromRow)]
struct SpeakerRow {
    speaker_id: i32,
    first_name: String,
    last_name: String,
    middle_name: Option<String>,
    company: Option<String>,
    company_url: Option<String>,
    blog_url: Option<String>,
    twitter: Option<String>,
    github: Option<String>,
}

impl From<SpeakerRow> for Speaker {
    fn from(r: SpeakerRow) -> Self {
        Speaker {
            speaker_id: r.speaker_id,
            first_name: r.first_name,
            last_name: r.last_name,
            middle_name: r.middle_name,
            company: r.company,
            company_url: r.company_url,
            blog_url: r.blog_url,
            twitter: r.twitter,
            github: r.github,
        }
    }
}

/// A talk joined with its speaker.
#[derive(sqlx::FromRow)]
struct TalkRow {
    talk_id: i32,
    camp_id: i32,
    title: String,
    #[sqlx(rename = "abstract")]
    abstract_: String,
    level: i32,
    #[sqlx(flatten)]
    speaker: SpeakerRow,
}

impl TalkRow {
    fn into_talk(self, include_speaker: bool) -> Talk {
        Talk {
            talk_id: self.talk_id,
            camp_id: self.camp_id,
            title: self.title,
            abstract_: self.abstract_,
            level: self.level,
            speaker: include_speaker.then(|| self.speaker.into()),
        }
    }
}

#[derive(Clone)]
pub struct PgCampRepository {
    pool: PgPool,
    schema: String,
}

impl PgCampRepository {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgCampRepository {
            pool,
            schema: schema.into(),
        }
    }

    fn table(&self, name: &str) -> String {
        crate::store::qualified_table(&self.schema, name)
    }

    async fn attach_talks(&self, camps: &mut [Camp]) -> RepoResult<()> {
        if camps.is_empty() {
            return Ok(());
        }
        let ids: Vec<i32> = camps.iter().map(|c| c.camp_id).collect();
        let sql = format!(
            "SELECT {} FROM {} t JOIN {} s ON s.speaker_id = t.speaker_id WHERE t.camp_id = ANY($1) ORDER BY t.talk_id",
            TALK_COLUMNS,
            self.table("talks"),
            self.table("speakers")
        );
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, TalkRow>(&sql).bind(&ids).fetch_all(&self.pool).await?;
        let mut by_camp: HashMap<i32, Vec<Talk>> = HashMap::new();
        for row in rows {
            let talk = row.into_talk(true);
            by_camp.entry(talk.camp_id).or_default().push(talk);
        }
        for camp in camps.iter_mut() {
            camp.talks = by_camp.remove(&camp.camp_id).unwrap_or_default();
        }
        Ok(())
    }

    async fn fetch_talks(&self, filter: &str, moniker: &str, talk_id: Option<i32>) -> RepoResult<Vec<TalkRow>> {
        let sql = format!(
            "SELECT {} FROM {} t JOIN {} c ON c.camp_id = t.camp_id JOIN {} s ON s.speaker_id = t.speaker_id \
             WHERE {} ORDER BY t.talk_id",
            TALK_COLUMNS,
            self.table("talks"),
            self.table("camps"),
            self.table("speakers"),
            filter
        );
        tracing::debug!(sql = %sql, "query");
        let mut q = sqlx::query_as::<_, TalkRow>(&sql).bind(moniker);
        if let Some(id) = talk_id {
            q = q.bind(id);
        }
        Ok(q.fetch_all(&self.pool).await?)
    }
}

#[async_trait]
impl CampRepository for PgCampRepository {
    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn all_camps(&self, include_talks: bool) -> RepoResult<Vec<Camp>> {
        let sql = format!("SELECT {} FROM {} ORDER BY camp_id", CAMP_COLUMNS, self.table("camps"));
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, CampRow>(&sql).fetch_all(&self.pool).await?;
        let mut camps: Vec<Camp> = rows.into_iter().map(Camp::from).collect();
        if include_talks {
            self.attach_talks(&mut camps).await?;
        }
        Ok(camps)
    }

    async fn camps_by_event_date(&self, event_date: NaiveDate, include_talks: bool) -> RepoResult<Vec<Camp>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE event_date = $1 ORDER BY camp_id",
            CAMP_COLUMNS,
            self.table("camps")
        );
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, CampRow>(&sql)
            .bind(event_date)
            .fetch_all(&self.pool)
            .await?;
        let mut camps: Vec<Camp> = rows.into_iter().map(Camp::from).collect();
        if include_talks {
            self.attach_talks(&mut camps).await?;
        }
        Ok(camps)
    }

    async fn camp(&self, moniker: &str, include_talks: bool) -> RepoResult<Option<Camp>> {
        let sql = format!("SELECT {} FROM {} WHERE moniker = $1", CAMP_COLUMNS, self.table("camps"));
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, CampRow>(&sql)
            .bind(moniker)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let mut camps = vec![Camp::from(row)];
        if include_talks {
            self.attach_talks(&mut camps).await?;
        }
        Ok(camps.pop())
    }

    async fn add_camp(&self, camp: &Camp) -> RepoResult<Option<Camp>> {
        let sql = format!(
            "INSERT INTO {} (name, moniker, event_date, length, venue_name, address1, address2, address3, \
             city_town, state_province, postal_code, country) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             ON CONFLICT (moniker) DO NOTHING RETURNING {}",
            self.table("camps"),
            CAMP_COLUMNS
        );
        let loc = &camp.location;
        let row = sqlx::query_as::<_, CampRow>(&sql)
            .bind(&camp.name)
            .bind(&camp.moniker)
            .bind(camp.event_date)
            .bind(camp.length)
            .bind(&loc.venue_name)
            .bind(&loc.address1)
            .bind(&loc.address2)
            .bind(&loc.address3)
            .bind(&loc.city_town)
            .bind(&loc.state_province)
            .bind(&loc.postal_code)
            .bind(&loc.country)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Camp::from))
    }

    async fn update_camp(&self, camp: &Camp) -> RepoResult<Option<Camp>> {
        let sql = format!(
            "UPDATE {} SET name = $2, event_date = $3, length = $4, venue_name = $5, address1 = $6, \
             address2 = $7, address3 = $8, city_town = $9, state_province = $10, postal_code = $11, \
             country = $12 WHERE camp_id = $1 RETURNING {}",
            self.table("camps"),
            CAMP_COLUMNS
        );
        let loc = &camp.location;
        let row = sqlx::query_as::<_, CampRow>(&sql)
            .bind(camp.camp_id)
            .bind(&camp.name)
            .bind(camp.event_date)
            .bind(camp.length)
            .bind(&loc.venue_name)
            .bind(&loc.address1)
            .bind(&loc.address2)
            .bind(&loc.address3)
            .bind(&loc.city_town)
            .bind(&loc.state_province)
            .bind(&loc.postal_code)
            .bind(&loc.country)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Camp::from))
    }

    async fn delete_camp(&self, camp_id: i32) -> RepoResult<bool> {
        let sql = format!("DELETE FROM {} WHERE camp_id = $1", self.table("camps"));
        let done = sqlx::query(&sql).bind(camp_id).execute(&self.pool).await?;
        Ok(done.rows_affected() > 0)
    }

    async fn talks_by_moniker(&self, moniker: &str, include_speakers: bool) -> RepoResult<Vec<Talk>> {
        let rows = self.fetch_talks("c.moniker = $1", moniker, None).await?;
        Ok(rows.into_iter().map(|r| r.into_talk(include_speakers)).collect())
    }

    async fn talk_by_moniker(&self, moniker: &str, talk_id: i32, include_speakers: bool) -> RepoResult<Option<Talk>> {
        let rows = self
            .fetch_talks("c.moniker = $1 AND t.talk_id = $2", moniker, Some(talk_id))
            .await?;
        Ok(rows.into_iter().next().map(|r| r.into_talk(include_speakers)))
    }

    async fn speaker(&self, speaker_id: i32) -> RepoResult<Option<Speaker>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE speaker_id = $1",
            SPEAKER_COLUMNS,
            self.table("speakers")
        );
        let row = sqlx::query_as::<_, SpeakerRow>(&sql)
            .bind(speaker_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Speaker::from))
    }

    async fn add_talk(&self, talk: &Talk) -> RepoResult<Option<Talk>> {
        let Some(speaker_id) = talk.speaker.as_ref().map(|s| s.speaker_id) else {
            return Ok(None);
        };
        let talks = self.table("talks");
        let camps = self.table("camps");
        let speakers = self.table("speakers");
        // Both parents are re-checked in the insert itself; a concurrent delete yields no row.
        let sql = format!(
            "WITH t AS ( \
                INSERT INTO {talks} (camp_id, speaker_id, title, abstract, level) \
                SELECT $1, $2, $3, $4, $5 \
                WHERE EXISTS (SELECT 1 FROM {camps} WHERE camp_id = $1) \
                  AND EXISTS (SELECT 1 FROM {speakers} WHERE speaker_id = $2) \
                RETURNING * \
             ) SELECT {cols} FROM t JOIN {speakers} s ON s.speaker_id = t.speaker_id",
            cols = TALK_COLUMNS,
        );
        let row = sqlx::query_as::<_, TalkRow>(&sql)
            .bind(talk.camp_id)
            .bind(speaker_id)
            .bind(&talk.title)
            .bind(&talk.abstract_)
            .bind(talk.level)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.into_talk(true)))
    }

    async fn update_talk(&self, talk: &Talk) -> RepoResult<Option<Talk>> {
        let talks = self.table("talks");
        let speakers = self.table("speakers");
        let sql = format!(
            "WITH t AS ( \
                UPDATE {talks} SET title = $2, abstract = $3, level = $4, \
                speaker_id = COALESCE($5, speaker_id) \
                WHERE talk_id = $1 RETURNING * \
             ) SELECT {cols} FROM t JOIN {speakers} s ON s.speaker_id = t.speaker_id",
            cols = TALK_COLUMNS,
        );
        let row = sqlx::query_as::<_, TalkRow>(&sql)
            .bind(talk.talk_id)
            .bind(&talk.title)
            .bind(&talk.abstract_)
            .bind(talk.level)
            .bind(talk.speaker.as_ref().map(|s| s.speaker_id))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.into_talk(true)))
    }

    async fn delete_talk(&self, talk_id: i32) -> RepoResult<bool> {
        let sql = format!("DELETE FROM {} WHERE talk_id = $1", self.table("talks"));
        let done = sqlx::query(&sql).bind(talk_id).execute(&self.pool).await?;
        Ok(done.rows_affected() > 0)
    }
}
