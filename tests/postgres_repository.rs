//! `PgCampRepository` against a live PostgreSQL. Skipped when `DATABASE_URL` is unset.
//!
//! Each test works in its own schema and drops it afterwards.

use camp_api::model::{Camp, Location, Talk};
use camp_api::{ensure_tables, seed_if_empty, CampRepository, PgCampRepository};
use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::{SystemTime, UNIX_EPOCH};

async fn scratch_schema(tag: &str) -> Option<(PgPool, String)> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping {tag}");
        return None;
    };
    let pool = PgPoolOptions::new().max_connections(4).connect(&url).await.unwrap();
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().subsec_nanos();
    let schema = format!("camp_test_{}_{}_{}", tag, std::process::id(), nanos);
    ensure_tables(&pool, &schema).await.unwrap();
    Some((pool, schema))
}

async fn drop_schema(pool: &PgPool, schema: &str) {
    sqlx::query(&format!("DROP SCHEMA \"{}\" CASCADE", schema))
        .execute(pool)
        .await
        .unwrap();
}

fn camp(moniker: &str, day: u32) -> Camp {
    Camp {
        camp_id: 0,
        name: "Seattle Code Camp".into(),
        moniker: moniker.into(),
        event_date: NaiveDate::from_ymd_opt(2019, 3, day).unwrap(),
        length: 2,
        location: Location {
            venue_name: Some("Convention Center".into()),
            city_town: Some("Seattle".into()),
            ..Location::default()
        },
        talks: Vec::new(),
    }
}

#[tokio::test]
async fn seeded_data_reads_back_with_talks_and_speakers() {
    let Some((pool, schema)) = scratch_schema("seed").await else {
        return;
    };
    assert!(seed_if_empty(&pool, &schema).await.unwrap());
    assert!(!seed_if_empty(&pool, &schema).await.unwrap());
    let repo = PgCampRepository::new(pool.clone(), schema.clone());

    repo.ping().await.unwrap();
    let camps = repo.all_camps(true).await.unwrap();
    assert_eq!(camps.len(), 1);
    assert_eq!(camps[0].moniker, "ATL2018");
    assert_eq!(camps[0].talks.len(), 2);
    assert!(camps[0].talks.iter().all(|t| t.speaker.is_some()));

    let day = NaiveDate::from_ymd_opt(2018, 10, 18).unwrap();
    assert_eq!(repo.camps_by_event_date(day, false).await.unwrap().len(), 1);
    let other = NaiveDate::from_ymd_opt(2018, 10, 19).unwrap();
    assert!(repo.camps_by_event_date(other, false).await.unwrap().is_empty());

    let talks = repo.talks_by_moniker("ATL2018", false).await.unwrap();
    assert_eq!(talks.len(), 2);
    assert!(talks.iter().all(|t| t.speaker.is_none()));

    drop_schema(&pool, &schema).await;
}

#[tokio::test]
async fn camp_writes_honor_unique_moniker_and_cascade() {
    let Some((pool, schema)) = scratch_schema("camps").await else {
        return;
    };
    seed_if_empty(&pool, &schema).await.unwrap();
    let repo = PgCampRepository::new(pool.clone(), schema.clone());

    let saved = repo.add_camp(&camp("SEA2019", 9)).await.unwrap().unwrap();
    assert!(saved.camp_id > 0);
    assert_eq!(saved.location.city_town.as_deref(), Some("Seattle"));
    assert!(repo.add_camp(&camp("SEA2019", 10)).await.unwrap().is_none());

    let mut changed = saved.clone();
    changed.name = "Seattle Code Camp 2019".into();
    changed.length = 3;
    let updated = repo.update_camp(&changed).await.unwrap().unwrap();
    assert_eq!(updated.name, "Seattle Code Camp 2019");
    assert_eq!(updated.length, 3);

    let mut missing = changed.clone();
    missing.camp_id = 9_999;
    assert!(repo.update_camp(&missing).await.unwrap().is_none());

    let atl = repo.camp("ATL2018", false).await.unwrap().unwrap();
    assert!(repo.delete_camp(atl.camp_id).await.unwrap());
    assert!(!repo.delete_camp(atl.camp_id).await.unwrap());
    assert!(repo.talks_by_moniker("ATL2018", true).await.unwrap().is_empty());
    let (orphans,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM \"{}\".talks", schema))
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orphans, 0);

    drop_schema(&pool, &schema).await;
}

#[tokio::test]
async fn talk_writes_check_parents_and_swap_speakers() {
    let Some((pool, schema)) = scratch_schema("talks").await else {
        return;
    };
    seed_if_empty(&pool, &schema).await.unwrap();
    let repo = PgCampRepository::new(pool.clone(), schema.clone());
    let atl = repo.camp("ATL2018", false).await.unwrap().unwrap();
    let shawn = repo.speaker(1).await.unwrap().unwrap();
    let resa = repo.speaker(2).await.unwrap().unwrap();
    assert!(repo.speaker(999).await.unwrap().is_none());

    let mut talk = Talk {
        talk_id: 0,
        camp_id: atl.camp_id,
        title: "Async Rust in Practice".into(),
        abstract_: "Futures, executors and what actually runs where.".into(),
        level: 200,
        speaker: Some(shawn.clone()),
    };
    let saved = repo.add_talk(&talk).await.unwrap().unwrap();
    assert_eq!(saved.speaker.as_ref().map(|s| s.speaker_id), Some(shawn.speaker_id));

    talk.speaker = Some(camp_api::model::Speaker {
        speaker_id: 999,
        ..shawn.clone()
    });
    assert!(repo.add_talk(&talk).await.unwrap().is_none());
    talk.speaker = Some(shawn.clone());
    talk.camp_id = 9_999;
    assert!(repo.add_talk(&talk).await.unwrap().is_none());

    let mut edit = saved.clone();
    edit.title = "Async Rust, Revisited".into();
    edit.speaker = None;
    let kept = repo.update_talk(&edit).await.unwrap().unwrap();
    assert_eq!(kept.title, "Async Rust, Revisited");
    assert_eq!(kept.speaker.as_ref().map(|s| s.speaker_id), Some(shawn.speaker_id));

    edit.speaker = Some(resa.clone());
    let swapped = repo.update_talk(&edit).await.unwrap().unwrap();
    assert_eq!(swapped.speaker.as_ref().map(|s| s.speaker_id), Some(resa.speaker_id));

    let fetched = repo
        .talk_by_moniker("ATL2018", saved.talk_id, true)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.speaker.map(|s| s.first_name), Some("Resa".to_string()));
    assert!(repo.talk_by_moniker("NOPE", saved.talk_id, true).await.unwrap().is_none());

    assert!(repo.delete_talk(saved.talk_id).await.unwrap());
    assert!(!repo.delete_talk(saved.talk_id).await.unwrap());

    drop_schema(&pool, &schema).await;
}
