//! Free-game deal records.

use super::id::DealId;
use super::storefront::{store_display_name, Storefront};

/// One free-game listing returned by the upstream aggregator.
///
/// Deals are transient: only the id of the last posted deal is persisted
/// per target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    /// Upstream deal identifier.
    pub id: DealId,
    /// Game title.
    pub title: String,
    /// Raw upstream store id (e.g. `"1"` for Steam).
    pub store_id: String,
    /// Thumbnail image URL, possibly empty.
    pub thumbnail_url: String,
}

impl Deal {
    /// Create a deal from its upstream fields.
    pub fn new(
        id: impl Into<DealId>,
        title: impl Into<String>,
        store_id: impl Into<String>,
        thumbnail_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            store_id: store_id.into(),
            thumbnail_url: thumbnail_url.into(),
        }
    }

    /// The storefront this deal belongs to, if it is a known one.
    #[must_use]
    pub fn storefront(&self) -> Option<Storefront> {
        Storefront::from_upstream(&self.store_id)
    }

    /// Store display name, "Unknown Store" for unrecognised ids.
    #[must_use]
    pub fn store_name(&self) -> &'static str {
        store_display_name(&self.store_id)
    }

    /// Thumbnail URL, or `None` when upstream sent an empty value.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        let thumb = self.thumbnail_url.trim();
        (!thumb.is_empty()).then_some(thumb)
    }

    /// Build the public deal link from a redirect URL prefix.
    ///
    /// The prefix is expected to end right before the deal id, e.g.
    /// `https://www.cheapshark.com/redirect?dealID=`.
    #[must_use]
    pub fn link(&self, redirect_prefix: &str) -> String {
        format!("{redirect_prefix}{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_appends_deal_id() {
        let deal = Deal::new("abc%3D", "Foo", "1", "u");
        assert_eq!(
            deal.link("https://www.cheapshark.com/redirect?dealID="),
            "https://www.cheapshark.com/redirect?dealID=abc%3D"
        );
    }

    #[test]
    fn store_lookup_uses_fixed_table() {
        assert_eq!(Deal::new("1", "Foo", "25", "").store_name(), "Epic Games");
        assert_eq!(
            Deal::new("1", "Foo", "25", "").storefront(),
            Some(Storefront::EpicGames)
        );
        assert_eq!(Deal::new("1", "Foo", "99", "").store_name(), "Unknown Store");
    }

    #[test]
    fn empty_thumbnail_is_none() {
        assert_eq!(Deal::new("1", "Foo", "1", "  ").thumbnail(), None);
        assert_eq!(Deal::new("1", "Foo", "1", "u").thumbnail(), Some("u"));
    }
}
