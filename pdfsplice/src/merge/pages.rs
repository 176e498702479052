//! Page tree assembly.
//!
//! The merged document gets a single flat `Pages` node. Pages from every
//! source are re-parented onto it in order. Attributes a page used to
//! inherit from its old tree are copied onto the page first, so it renders
//! the same without its former ancestors.

use std::collections::HashSet;

use crate::error::MergeError;
use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};

/// Page attributes that may be inherited from ancestor `Pages` nodes.
pub const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Upper bound on page tree depth when walking `Parent` links.
const MAX_TREE_DEPTH: usize = 64;

/// The flat page tree of a document under construction.
#[derive(Debug)]
pub struct PageTree {
    pages_id: ObjectId,
    kids: Vec<ObjectId>,
}

impl PageTree {
    /// Reserve the tree root in `target`.
    pub fn new(target: &mut Document) -> Self {
        Self {
            pages_id: target.new_object_id(),
            kids: Vec::new(),
        }
    }

    /// Object id of the `Pages` root.
    pub fn pages_id(&self) -> ObjectId {
        self.pages_id
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Move every page of `source` into `target`, after the pages already
    /// there.
    ///
    /// `source` is renumbered past `target`'s highest object id so nothing
    /// collides. All of its objects except the catalog and the old page
    /// tree nodes are carried over. Returns the number of pages appended.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::CorruptOrProtectedInput`] naming `name` when a
    /// page object is not a dictionary, or when a page's `Parent` chain
    /// points at a missing node or runs deeper than 64 levels.
    pub fn append(
        &mut self,
        target: &mut Document,
        name: &str,
        mut source: Document,
    ) -> Result<usize, MergeError> {
        source.renumber_objects_with(target.max_id + 1);
        let source_max_id = source.max_id;

        let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();

        let mut pages = Vec::with_capacity(page_ids.len());
        for &page_id in &page_ids {
            let mut page = source
                .get_dictionary(page_id)
                .map_err(|e| {
                    MergeError::corrupt_input(name, format!("unreadable page {page_id:?}: {e}"))
                })?
                .clone();

            for (key, value) in inherited_attributes(&source, name, &page)? {
                page.set(key, value);
            }
            page.set("Parent", self.pages_id);
            pages.push((page_id, page));
        }

        let page_set: HashSet<ObjectId> = page_ids.iter().copied().collect();
        for (id, object) in std::mem::take(&mut source.objects) {
            if page_set.contains(&id) || is_structural(&object) {
                continue;
            }
            target.objects.insert(id, object);
        }

        for (page_id, page) in pages {
            target.objects.insert(page_id, Object::Dictionary(page));
            self.kids.push(page_id);
        }

        target.max_id = target.max_id.max(source_max_id);
        Ok(page_ids.len())
    }

    /// Write the `Pages` root into `target`.
    pub fn write(&self, target: &mut Document) {
        let kids: Vec<Object> = self.kids.iter().map(|&id| Object::Reference(id)).collect();
        target.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => self.kids.len() as i64,
            }),
        );
    }
}

/// Catalog and page tree nodes are rebuilt for the merged document.
fn is_structural(object: &Object) -> bool {
    matches!(object.type_name(), Ok(b"Catalog" | b"Pages"))
}

/// Inheritable attributes `page` lacks but one of its ancestors defines.
///
/// The nearest ancestor wins.
fn inherited_attributes(
    doc: &Document,
    name: &str,
    page: &Dictionary,
) -> Result<Vec<(&'static [u8], Object)>, MergeError> {
    let mut missing: Vec<&'static [u8]> = INHERITABLE_ATTRIBUTES
        .iter()
        .copied()
        .filter(|key| !page.has(key))
        .collect();
    let mut found = Vec::new();

    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;
    while let Some(node_id) = parent {
        if missing.is_empty() {
            break;
        }
        depth += 1;
        if depth > MAX_TREE_DEPTH {
            return Err(MergeError::corrupt_input(
                name,
                format!("page tree deeper than {MAX_TREE_DEPTH} levels"),
            ));
        }
        let node = doc.get_dictionary(node_id).map_err(|e| {
            MergeError::corrupt_input(name, format!("broken page tree node {node_id:?}: {e}"))
        })?;

        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                found.push((*key, value.clone()));
                false
            }
            Err(_) => true,
        });

        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    Ok(found)
}
