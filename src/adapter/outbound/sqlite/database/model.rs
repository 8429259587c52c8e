//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::targets;

/// Database row for a guild's target.
///
/// Snowflakes are stored as signed 64-bit integers; store toggles as a JSON
/// object keyed by store name.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = targets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TargetRow {
    pub guild_id: i64,
    pub enabled: bool,
    pub channel_id: Option<i64>,
    pub stores: String,
    pub last_check: i64,
    pub last_deal_id: Option<String>,
    pub ping_role_id: Option<i64>,
    pub updated_at: String,
}

/// Settings columns written by command handlers.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = targets)]
#[diesel(treat_none_as_null = true)]
pub struct TargetSettingsChangeset {
    pub enabled: bool,
    pub channel_id: Option<i64>,
    pub stores: String,
    pub ping_role_id: Option<i64>,
    pub updated_at: String,
}
