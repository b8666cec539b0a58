//! Table transforms applied between loading and export

mod combine;
mod prune;

pub use combine::combine;
pub use prune::{prune, prune_strict};
