//! Documents feed query.
//!
//! Adds folder scoping, sharing-principal filters, title matching and the
//! deleted/folder visibility flags on top of a generic base query. Parameters
//! are rendered after the base's own, in the fixed order `writer`, `reader`,
//! `title` (+ `title-exact`), `showdeleted`, `showfolders`.

use serde::{Deserialize, Serialize};

use super::{Query, QueryError, QueryParameters, QueryUri};
use crate::models::{EmailPrincipal, RELATION_COLLABORATOR, RELATION_READER};

/// Literal path prefix for folder scoping; `%3A` is an already-escaped colon.
const FOLDER_PATH_PREFIX: &str = "/folder%3A";

/// Query for the documents feed.
///
/// `B` supplies the generic parameters and the single-entry decision. String
/// filters keep the unset / empty / non-empty distinction: `None` is not
/// rendered, `Some("")` is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentsQuery<B = Query> {
    base: B,
    folder_id: Option<String>,
    title: Option<String>,
    exact_title: bool,
    show_deleted: bool,
    show_folders: bool,
    collaborator_addresses: Vec<EmailPrincipal>,
    reader_addresses: Vec<EmailPrincipal>,
}

impl DocumentsQuery<Query> {
    /// Create a new documents query with its search term set to `q`
    pub fn new(q: Option<&str>) -> Self {
        Self::with_base(Query::new(q))
    }

    /// Create a new documents query with a search term and paging limits
    pub fn with_limits(q: Option<&str>, start_index: u32, max_results: u32) -> Self {
        Self::with_base(Query::with_limits(q, start_index, max_results))
    }
}

impl<B: QueryParameters> DocumentsQuery<B> {
    /// Wrap an existing base query; every documents filter starts at its default.
    pub fn with_base(base: B) -> Self {
        Self {
            base,
            folder_id: None,
            title: None,
            exact_title: false,
            show_deleted: false,
            show_folders: false,
            collaborator_addresses: Vec::new(),
            reader_addresses: Vec::new(),
        }
    }

    pub fn base(&self) -> &B {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut B {
        &mut self.base
    }

    /// ID of the folder to search in, if any
    pub fn folder_id(&self) -> Option<&str> {
        self.folder_id.as_deref()
    }

    /// Restrict results to one folder, or `None` to search everywhere
    pub fn set_folder_id(&mut self, folder_id: Option<&str>) {
        self.folder_id = folder_id.map(str::to_string);
    }

    /// The title (or title fragment) being searched for
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn exact_title(&self) -> bool {
        self.exact_title
    }

    /// Set the title filter and whether it must match exactly.
    ///
    /// Passing `None` unsets the title; `exact_title` is stored either way.
    pub fn set_title(&mut self, title: Option<&str>, exact_title: bool) {
        self.title = title.map(str::to_string);
        self.exact_title = exact_title;
    }

    /// Toggle exact matching without touching the title itself
    pub fn set_exact_title(&mut self, exact_title: bool) {
        self.exact_title = exact_title;
    }

    pub fn show_deleted(&self) -> bool {
        self.show_deleted
    }

    /// Whether deleted documents should be returned
    pub fn set_show_deleted(&mut self, show_deleted: bool) {
        self.show_deleted = show_deleted;
    }

    pub fn show_folders(&self) -> bool {
        self.show_folders
    }

    /// Whether folders should be returned alongside documents
    pub fn set_show_folders(&mut self, show_folders: bool) {
        self.show_folders = show_folders;
    }

    /// Collaborators whose editable documents are queried, in insertion order
    pub fn collaborator_addresses(&self) -> &[EmailPrincipal] {
        &self.collaborator_addresses
    }

    /// Readers whose readable documents are queried, in insertion order
    pub fn reader_addresses(&self) -> &[EmailPrincipal] {
        &self.reader_addresses
    }

    /// Append a collaborator address. Fails on an empty address and leaves
    /// the list unchanged.
    pub fn add_collaborator(&mut self, address: &str) -> Result<(), QueryError> {
        let principal = EmailPrincipal::new(address, RELATION_COLLABORATOR, None, false)
            .inspect_err(|e| tracing::debug!(error = %e, "rejected collaborator address"))?;
        self.collaborator_addresses.push(principal);
        Ok(())
    }

    /// Append a reader address. Fails on an empty address and leaves the
    /// list unchanged.
    pub fn add_reader(&mut self, address: &str) -> Result<(), QueryError> {
        let principal = EmailPrincipal::new(address, RELATION_READER, None, false)
            .inspect_err(|e| tracing::debug!(error = %e, "rejected reader address"))?;
        self.reader_addresses.push(principal);
        Ok(())
    }

    fn append_collaborators(&self, uri: &mut QueryUri) {
        append_principals(uri, "writer", &self.collaborator_addresses);
    }

    fn append_readers(&self, uri: &mut QueryUri) {
        append_principals(uri, "reader", &self.reader_addresses);
    }

    fn append_title(&self, uri: &mut QueryUri) {
        if let Some(title) = &self.title {
            uri.append_param("title", title);
            // Always follows `title=`, so never the first parameter
            if self.exact_title {
                uri.push_str("&title-exact=true");
            }
        }
    }

    fn append_visibility(&self, uri: &mut QueryUri) {
        uri.append_param("showdeleted", bool_str(self.show_deleted));
        uri.push_str("&showfolders=");
        uri.push_str(bool_str(self.show_folders));
    }
}

impl<B: QueryParameters> QueryParameters for DocumentsQuery<B> {
    fn entry_id(&self) -> Option<&str> {
        self.base.entry_id()
    }

    fn append_parameters(&self, uri: &mut QueryUri) {
        let entry_id = self.base.entry_id();

        if entry_id.is_none() {
            if let Some(folder_id) = &self.folder_id {
                uri.push_str(FOLDER_PATH_PREFIX);
                uri.push_escaped(folder_id);
            }
        }

        self.base.append_parameters(uri);

        // Single-entry fetches take no collection filters
        if entry_id.is_some() {
            return;
        }

        let steps: [fn(&Self, &mut QueryUri); 4] = [
            Self::append_collaborators,
            Self::append_readers,
            Self::append_title,
            Self::append_visibility,
        ];
        for step in steps {
            step(self, uri);
        }
    }
}

/// Render `name=<a1>;<a2>;...`, skipping the parameter for an empty list.
fn append_principals(uri: &mut QueryUri, name: &str, principals: &[EmailPrincipal]) {
    let Some((first, rest)) = principals.split_first() else {
        return;
    };

    uri.append_param(name, first.address());
    for principal in rest {
        uri.push(';');
        uri.push_escaped(principal.address());
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
