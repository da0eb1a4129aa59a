use serde::{Deserialize, Serialize};

use crate::id::{FullId, ShortId};

/// Both identifiers of a paste, as returned to callers after hashing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    pub id: FullId,
    pub short_id: ShortId,
}

impl From<FullId> for Address {
    fn from(id: FullId) -> Self {
        Self {
            id,
            short_id: id.short(),
        }
    }
}
