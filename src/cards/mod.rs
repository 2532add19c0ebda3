//! Card, weapon and hero data.
//!
//! All data here is static and pre-validated: the external loader parses
//! raw definitions into these closed types before a match starts.

mod card;
mod hero;
mod weapon;

pub use card::{Card, CardId, Keyword};
pub use hero::Hero;
pub use weapon::Weapon;
