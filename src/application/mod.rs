//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.

pub mod check;
pub mod command;
pub mod notice;
pub mod poller;

pub use check::{CheckOutcome, CheckPolicy, DealCheck};
pub use command::{CommandService, FreeGamesCommand, Invocation, RoleArg, ROOT_COMMAND};
pub use notice::{NoticeFormatter, NoticeKind, DEFAULT_REDIRECT_PREFIX};
pub use poller::{PollSummary, Poller};
