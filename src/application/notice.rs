//! Rendering of deal notices.
//!
//! Three flavours exist: the background alert, the reply to a manual check,
//! and the post made right after checks are switched on.

use crate::domain::Deal;
use crate::port::{DealNotice, NoticeField};

/// Default prefix for deal links; the deal id is appended verbatim.
pub const DEFAULT_REDIRECT_PREFIX: &str = "https://www.cheapshark.com/redirect?dealID=";

/// Which path produced the notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Periodic background post.
    Alert,
    /// Explicit `check` command.
    ManualCheck,
    /// Post triggered by switching checks on.
    Enabled,
}

/// Builds [`DealNotice`]s with deployment-specific links and hints.
#[derive(Debug, Clone)]
pub struct NoticeFormatter {
    redirect_prefix: String,
    command_prefix: String,
    cooldown_secs: i64,
}

impl NoticeFormatter {
    /// Create a formatter.
    ///
    /// * `redirect_prefix` - link prefix the deal id is appended to
    /// * `command_prefix` - chat prefix shown in usage hints (e.g. `!`)
    /// * `cooldown_secs` - background cooldown, announced in alert footers
    pub fn new(
        redirect_prefix: impl Into<String>,
        command_prefix: impl Into<String>,
        cooldown_secs: i64,
    ) -> Self {
        Self {
            redirect_prefix: redirect_prefix.into(),
            command_prefix: command_prefix.into(),
            cooldown_secs,
        }
    }

    /// Render a notice for `deal`.
    #[must_use]
    pub fn render(&self, kind: NoticeKind, deal: &Deal) -> DealNotice {
        let url = deal.link(&self.redirect_prefix);
        let linked_title = format!("[{}]({url})", deal.title);
        let store_field = NoticeField {
            name: "Store".to_string(),
            value: deal.store_name().to_string(),
            inline: true,
        };
        let root = format!("{}{}", self.command_prefix, super::command::ROOT_COMMAND);

        let (title, description, fields, footer) = match kind {
            NoticeKind::Alert => (
                "🎮 Free Game Alert!".to_string(),
                format!("{linked_title} is free right now!"),
                vec![store_field],
                format!("Next check in {}.", describe_duration(self.cooldown_secs)),
            ),
            NoticeKind::ManualCheck => (
                "🎮 Free Game Check".to_string(),
                format!("{linked_title} is currently free!"),
                vec![store_field],
                format!("Use {root} <store> to manage sources."),
            ),
            NoticeKind::Enabled => (
                "🎮 Free Game Found!".to_string(),
                "Here's a currently free game from your enabled stores.".to_string(),
                vec![
                    NoticeField {
                        name: deal.title.clone(),
                        value: format!("[View Deal]({url})"),
                        inline: false,
                    },
                    store_field,
                ],
                format!("Use {root} toggle again to turn checks off."),
            ),
        };

        DealNotice {
            deal: deal.clone(),
            title,
            description,
            url,
            fields,
            thumbnail: deal.thumbnail().map(str::to_string),
            footer,
        }
    }
}

/// Coarse human-readable duration ("3 hours", "90 minutes", "45 seconds").
#[must_use]
pub fn describe_duration(secs: i64) -> String {
    fn plural(n: i64, unit: &str) -> String {
        if n == 1 {
            format!("1 {unit}")
        } else {
            format!("{n} {unit}s")
        }
    }

    let secs = secs.max(0);
    if secs >= 3_600 && secs % 3_600 == 0 {
        plural(secs / 3_600, "hour")
    } else if secs >= 60 {
        plural(secs / 60, "minute")
    } else {
        plural(secs, "second")
    }
}
