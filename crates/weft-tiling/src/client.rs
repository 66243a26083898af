use weft_common::{ClientId, Size};

/// The engine's lightweight view of a host window.
///
/// Identity lives in the driver's client map; this only carries what the
/// reconciliation step needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: ClientId,
    /// Display name, for diagnostics.
    pub name: String,
    /// Hard floor used when fitting tile sizes.
    pub min_size: Size,
}

impl Client {
    pub fn new(id: ClientId, name: impl Into<String>, min_size: Size) -> Self {
        Self {
            id,
            name: name.into(),
            min_size,
        }
    }
}
