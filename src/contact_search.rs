//! Case-insensitive contact search over a precomputed normalized projection.
//
// The searchable copies are lower-cased once per build; each query lowers
// only itself. The index borrows the contact list, so the borrow checker
// guarantees it can never outlive or go stale against its source: any
// mutation of the list forces a rebuild.

use log::debug;

use crate::contacts::Contact;

/// One contact plus its lower-cased searchable fields.
#[derive(Debug)]
pub struct SearchableContact<'a> {
    contact: &'a Contact,
    name: String,
    email: String,
    organization: String,
}

impl<'a> SearchableContact<'a> {
    fn new(contact: &'a Contact) -> Self {
        Self {
            contact,
            name: contact.name.to_lowercase(),
            email: contact.email.to_lowercase(),
            organization: contact.organization.to_lowercase(),
        }
    }

    // Short-circuits left to right: name, then email, then organization.
    fn matches(&self, lowered_query: &str) -> bool {
        self.name.contains(lowered_query)
            || self.email.contains(lowered_query)
            || self.organization.contains(lowered_query)
    }
}

/// Derived search view over a contact list. Build once per list change,
/// query as often as needed.
#[derive(Debug)]
pub struct ContactSearchIndex<'a> {
    entries: Vec<SearchableContact<'a>>,
}

impl<'a> ContactSearchIndex<'a> {
    /// Normalize every contact in a single pass. Construction is
    /// all-or-nothing; a partially built index is never observable.
    pub fn build(contacts: &'a [Contact]) -> Self {
        let entries = contacts.iter().map(SearchableContact::new).collect::<Vec<_>>();
        debug!("built contact search index over {} contacts", entries.len());
        Self { entries }
    }

    /// Contacts whose name, email or organization contains `query`,
    /// case-insensitively, in their original relative order. The empty query
    /// matches everything.
    pub fn filter(&self, query: &str) -> Vec<&'a Contact> {
        let lowered = query.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.matches(&lowered))
            .map(|entry| entry.contact)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
