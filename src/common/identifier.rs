use derive_more::{Constructor, Deref, Display};
use serde::{Deserialize, Serialize};

/// A source-level name, as resolved by the front end.
#[derive(
    Constructor, Deref, Display, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RawIdentifier(String);

impl From<&str> for RawIdentifier {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}
