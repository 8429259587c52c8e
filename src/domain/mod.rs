//! Platform-agnostic domain types: storefronts, deals and per-guild targets.

pub mod deal;
pub mod id;
pub mod storefront;
pub mod target;

pub use deal::Deal;
pub use id::{ChannelId, DealId, GuildId, RoleId};
pub use storefront::{store_display_name, Storefront, UNKNOWN_STORE};
pub use target::{Eligibility, StoreToggles, Target};
