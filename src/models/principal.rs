//! Sharing principals used as collaborator/reader filters.

use serde::{Deserialize, Serialize};

use crate::query::QueryError;
use crate::utils::require_non_empty;

/// Relation tag for principals added through `add_collaborator`.
pub const RELATION_COLLABORATOR: &str = "collaborator";

/// Relation tag for principals added through `add_reader`.
pub const RELATION_READER: &str = "reader";

/// An e-mail identified actor that documents are shared with.
///
/// Only [`address`](EmailPrincipal::address) is rendered into query URIs; the
/// other fields are informational.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PrincipalRecord")]
pub struct EmailPrincipal {
    address: String,
    relation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    primary: bool,
}

/// Unchecked wire form, validated on the way in.
#[derive(Deserialize)]
struct PrincipalRecord {
    address: String,
    relation: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    primary: bool,
}

impl TryFrom<PrincipalRecord> for EmailPrincipal {
    type Error = QueryError;

    fn try_from(record: PrincipalRecord) -> Result<Self, Self::Error> {
        Self::new(
            record.address,
            record.relation,
            record.display_name,
            record.primary,
        )
    }
}

impl EmailPrincipal {
    /// Create a principal, rejecting an empty address.
    pub fn new(
        address: impl Into<String>,
        relation: impl Into<String>,
        display_name: Option<String>,
        primary: bool,
    ) -> Result<Self, QueryError> {
        let address = address.into();
        require_non_empty(&address, "e-mail address")?;

        Ok(Self {
            address,
            relation: relation.into(),
            display_name,
            primary,
        })
    }

    /// The e-mail address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The relation tag, e.g. `"reader"` or `"collaborator"`
    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn is_primary(&self) -> bool {
        self.primary
    }
}
