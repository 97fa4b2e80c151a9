//! Core list types.

mod builder;
mod list;
mod sync_root;

pub use builder::NotifyingListBuilder;
pub use list::{ElementsGuard, NotifyingList};
pub use sync_root::{SyncGuard, SyncRoot};
