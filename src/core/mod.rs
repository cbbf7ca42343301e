pub mod almanac;
pub mod compass;
pub mod coordinator;
pub mod discovery;
pub mod explorer;
pub mod layout;
pub mod selection_store;
pub mod slot;

pub use crate::domain::model::Selection;
pub use crate::domain::ports::{ContentProvider, KeyValueStore};
pub use crate::utils::error::Result;
pub use slot::{Outcome, Phase};
