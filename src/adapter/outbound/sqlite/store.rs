//! SQLite target store implementation.
//!
//! Provides persistent per-guild configuration and post records using
//! SQLite and Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{TargetRow, TargetSettingsChangeset};
use crate::adapter::outbound::sqlite::database::schema::targets;
use crate::domain::{ChannelId, DealId, GuildId, RoleId, StoreToggles, Target};
use crate::error::{Error, Result};
use crate::port::TargetStore;

/// SQLite-backed target store.
///
/// Implements the [`TargetStore`] trait with one row per guild.
pub struct SqliteTargetStore {
    /// Database connection pool.
    pool: DbPool,
}

fn to_sql_id(id: u64) -> Result<i64> {
    i64::try_from(id).map_err(|_| Error::Parse(format!("snowflake {id} out of range")))
}

fn from_sql_id(id: i64) -> Result<u64> {
    u64::try_from(id).map_err(|_| Error::Parse(format!("negative snowflake {id}")))
}

impl SqliteTargetStore {
    /// Create a new SQLite target store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(target: &Target, updated_at: &str) -> Result<TargetRow> {
        Ok(TargetRow {
            guild_id: to_sql_id(target.guild.get())?,
            enabled: target.enabled,
            channel_id: target.channel.map(|c| to_sql_id(c.get())).transpose()?,
            stores: serde_json::to_string(&target.stores)?,
            last_check: target.last_check,
            last_deal_id: target.last_posted_deal.as_ref().map(|d| d.as_str().to_string()),
            ping_role_id: target.ping_role.map(|r| to_sql_id(r.get())).transpose()?,
            updated_at: updated_at.to_string(),
        })
    }

    fn from_row(row: TargetRow) -> Result<Target> {
        let stores: StoreToggles =
            serde_json::from_str(&row.stores).map_err(|e| Error::Parse(e.to_string()))?;

        Ok(Target {
            guild: GuildId::new(from_sql_id(row.guild_id)?),
            enabled: row.enabled,
            channel: row
                .channel_id
                .map(from_sql_id)
                .transpose()?
                .map(ChannelId::new),
            stores,
            last_check: row.last_check,
            last_posted_deal: row.last_deal_id.map(DealId::from),
            ping_role: row
                .ping_role_id
                .map(from_sql_id)
                .transpose()?
                .map(RoleId::new),
        })
    }

    fn connection(
        &self,
    ) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<SqliteConnection>>>
    {
        self.pool.get().map_err(|e| Error::Connection(e.to_string()))
    }
}

#[async_trait]
impl TargetStore for SqliteTargetStore {
    async fn load(&self, guild: GuildId) -> Result<Target> {
        let mut conn = self.connection()?;

        let row: Option<TargetRow> = targets::table
            .find(to_sql_id(guild.get())?)
            .select(TargetRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        match row {
            Some(row) => Self::from_row(row),
            None => Ok(Target::new(guild)),
        }
    }

    async fn save_settings(&self, target: &Target) -> Result<()> {
        let row = Self::to_row(target, &Utc::now().to_rfc3339())?;
        let changes = TargetSettingsChangeset {
            enabled: row.enabled,
            channel_id: row.channel_id,
            stores: row.stores.clone(),
            ping_role_id: row.ping_role_id,
            updated_at: row.updated_at.clone(),
        };
        let mut conn = self.connection()?;

        conn.transaction(|conn| {
            let updated = diesel::update(targets::table.find(row.guild_id))
                .set(&changes)
                .execute(conn)?;
            if updated == 0 {
                diesel::insert_into(targets::table).values(&row).execute(conn)?;
            }
            Ok::<(), diesel::result::Error>(())
        })
        .map_err(|e| Error::Database(e.to_string()))
    }

    async fn list(&self) -> Result<Vec<Target>> {
        let mut conn = self.connection()?;

        let rows: Vec<TargetRow> = targets::table
            .select(TargetRow::as_select())
            .order(targets::guild_id.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }

    async fn record_post(&self, guild: GuildId, checked_at: i64, deal: &DealId) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        let mut fresh = Target::new(guild);
        fresh.record_post(checked_at, deal.clone());
        let row = Self::to_row(&fresh, &updated_at)?;
        let mut conn = self.connection()?;

        conn.transaction(|conn| {
            let updated = diesel::update(targets::table.find(row.guild_id))
                .set((
                    targets::last_check.eq(checked_at),
                    targets::last_deal_id.eq(Some(deal.as_str())),
                    targets::updated_at.eq(&updated_at),
                ))
                .execute(conn)?;
            if updated == 0 {
                diesel::insert_into(targets::table).values(&row).execute(conn)?;
            }
            Ok::<(), diesel::result::Error>(())
        })
        .map_err(|e| Error::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::database::connection::open;
    use crate::domain::Storefront;

    fn store() -> (tempfile::TempDir, SqliteTargetStore) {
        let dir = tempfile::tempdir().unwrap();
        let url = dir.path().join("targets.db").to_string_lossy().into_owned();
        let pool = open(&url).unwrap();
        (dir, SqliteTargetStore::new(pool))
    }

    fn configured(guild: u64) -> Target {
        let mut target = Target::new(GuildId::new(guild));
        target.channel = Some(ChannelId::new(1_234_567_890_123_456_789));
        target.ping_role = Some(RoleId::new(42));
        target.stores.set(Storefront::IndieGala, false);
        target
    }

    #[tokio::test]
    async fn load_unknown_guild_returns_defaults_without_writing() {
        let (_dir, store) = store();
        let target = store.load(GuildId::new(5)).await.unwrap();
        assert_eq!(target, Target::new(GuildId::new(5)));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn settings_round_trip() {
        let (_dir, store) = store();
        let target = configured(7);
        store.save_settings(&target).await.unwrap();

        let loaded = store.load(GuildId::new(7)).await.unwrap();
        assert_eq!(loaded, target);
    }

    #[tokio::test]
    async fn save_settings_clears_optional_columns() {
        let (_dir, store) = store();
        let mut target = configured(7);
        store.save_settings(&target).await.unwrap();

        target.channel = None;
        target.ping_role = None;
        store.save_settings(&target).await.unwrap();

        let loaded = store.load(GuildId::new(7)).await.unwrap();
        assert_eq!(loaded.channel, None);
        assert_eq!(loaded.ping_role, None);
    }

    #[tokio::test]
    async fn save_settings_keeps_post_record() {
        let (_dir, store) = store();
        let guild = GuildId::new(7);
        store.save_settings(&configured(7)).await.unwrap();
        store.record_post(guild, 1_000, &DealId::from("D1")).await.unwrap();

        let mut stale = configured(7);
        stale.enabled = false;
        store.save_settings(&stale).await.unwrap();

        let loaded = store.load(guild).await.unwrap();
        assert!(!loaded.enabled);
        assert_eq!(loaded.last_check, 1_000);
        assert_eq!(loaded.last_posted_deal, Some(DealId::from("D1")));
    }

    #[tokio::test]
    async fn record_post_creates_missing_row_with_defaults() {
        let (_dir, store) = store();
        let guild = GuildId::new(9);
        store.record_post(guild, 55, &DealId::from("42")).await.unwrap();

        let loaded = store.load(guild).await.unwrap();
        assert!(loaded.enabled);
        assert_eq!(loaded.stores, StoreToggles::all_enabled());
        assert_eq!(loaded.last_check, 55);
        assert_eq!(loaded.last_posted_deal, Some(DealId::from("42")));
    }

    #[tokio::test]
    async fn list_orders_by_guild() {
        let (_dir, store) = store();
        for guild in [30, 10, 20] {
            store.save_settings(&configured(guild)).await.unwrap();
        }
        let guilds: Vec<u64> = store
            .list()
            .await
            .unwrap()
            .iter()
            .map(|t| t.guild.get())
            .collect();
        assert_eq!(guilds, vec![10, 20, 30]);
    }

    #[tokio::test]
    async fn corrupt_store_toggles_surface_as_parse_error() {
        let (_dir, store) = store();
        store.save_settings(&configured(3)).await.unwrap();
        {
            let mut conn = store.connection().unwrap();
            diesel::update(targets::table.find(3_i64))
                .set(targets::stores.eq("not json"))
                .execute(&mut conn)
                .unwrap();
        }

        let err = store.load(GuildId::new(3)).await.unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
