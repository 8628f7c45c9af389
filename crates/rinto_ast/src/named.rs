//! Symbol table entries

use rinto_common::{Located, Location};
use std::fmt::{Display, Formatter};

/// Binds an identifier to the place it was declared
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedObject {
    identifier: String,
    location: Location,
}

impl NamedObject {
    pub fn new(identifier: impl Into<String>, location: Location) -> Self {
        Self {
            identifier: identifier.into(),
            location,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl Located for NamedObject {
    fn location(&self) -> Location {
        self.location.clone()
    }
}

impl Display for NamedObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.identifier)
    }
}
