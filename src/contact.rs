use std::collections::BTreeMap;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity key used on the wire. Never shown and never a field key.
pub const FIELD_ID: &str = "_id";
/// Reserved field: the contact's display name.
pub const FIELD_NAME: &str = "name";
/// Reserved field: the contact's phone number.
pub const FIELD_PHONE: &str = "phone";

/// Field name to value, ordered by key. Everything beyond `name` and
/// `phone` is a dynamic field the user invented (Email, Instagram, ...).
pub type ContactFields = BTreeMap<String, String>;

/// A single address-book record.
///
/// On the wire a contact is one flat JSON object: `_id` plus arbitrary
/// string-valued keys. The id is assigned by the server on create and is
/// stable for the record's lifetime; equality is by id alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(flatten)]
    pub fields: ContactFields,
}

impl Contact {
    pub fn new(id: impl Into<String>, fields: ContactFields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// The reserved name field, empty string when absent.
    pub fn name(&self) -> &str {
        self.fields.get(FIELD_NAME).map(String::as_str).unwrap_or("")
    }

    /// The reserved phone field, empty string when absent.
    pub fn phone(&self) -> &str {
        self.fields
            .get(FIELD_PHONE)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Dynamic fields in key order, i.e. everything except the reserved keys.
    pub fn dynamic_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter(|(key, _)| key.as_str() != FIELD_NAME && key.as_str() != FIELD_PHONE)
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Give a fetched record with no server id a client-side one.
    ///
    /// The service contract promises `_id` on every object, but the store
    /// needs identity even when a server misbehaves.
    pub fn ensure_id(&mut self) {
        if self.id.is_empty() {
            self.id = Uuid::new_v4().to_string();
        }
    }
}

// Identity and equality are defined by id alone; two fetches of the same
// record compare equal even when their fields differ.
impl PartialEq for Contact {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Contact {}

impl Hash for Contact {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Direction of the name sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }

    pub fn is_ascending(self) -> bool {
        self == SortOrder::Ascending
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Ascending => "name asc",
            SortOrder::Descending => "name desc",
        }
    }
}

/// Sort contacts by the reserved name field, lexicographically. The sort is
/// stable, so toggling the order twice restores an already-sorted list.
pub fn sort_by_name(contacts: &mut [Contact], order: SortOrder) {
    contacts.sort_by(|a, b| {
        let ordering = a.name().cmp(b.name());
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

/// Pick a key for a new field that does not collide with any existing key.
///
/// A taken name gets a numeric suffix counting up from 1: "Email" is taken,
/// so try "Email 1", then "Email 2", until a free key turns up. Deterministic
/// for a given key set, so re-running the same insertions yields the same
/// names.
pub fn unique_field_key<'a, I>(existing: I, proposed: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = existing.into_iter().collect();
    if !taken.contains(proposed) {
        return proposed.to_string();
    }
    let mut suffix = 1u32;
    loop {
        let candidate = format!("{proposed} {suffix}");
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: &str, name: &str) -> Contact {
        let mut fields = ContactFields::new();
        fields.insert(FIELD_NAME.to_string(), name.to_string());
        Contact::new(id, fields)
    }

    #[test]
    fn test_reserved_fields_default_to_empty() {
        let c = Contact::new("1", ContactFields::new());
        assert_eq!(c.name(), "");
        assert_eq!(c.phone(), "");
    }

    #[test]
    fn test_dynamic_fields_exclude_reserved_keys() {
        let mut fields = ContactFields::new();
        fields.insert("name".to_string(), "Alice".to_string());
        fields.insert("phone".to_string(), "555".to_string());
        fields.insert("Email".to_string(), "a@example.com".to_string());
        fields.insert("Instagram".to_string(), "alice".to_string());
        let c = Contact::new("1", fields);

        let dynamic: Vec<(&str, &str)> = c.dynamic_fields().collect();
        assert_eq!(
            dynamic,
            vec![("Email", "a@example.com"), ("Instagram", "alice")]
        );
    }

    #[test]
    fn test_equality_is_by_id_only() {
        let a = contact("1", "Alice");
        let also_a = contact("1", "Alice (renamed)");
        let b = contact("2", "Alice");

        assert_eq!(a, also_a);
        assert_ne!(a, b);
    }

    #[test]
    fn test_wire_decode_captures_id_and_flattens_fields() {
        let json = r#"{"_id":"abc","name":"Alice","phone":"555","Email":"a@example.com"}"#;
        let c: Contact = serde_json::from_str(json).unwrap();

        assert_eq!(c.id, "abc");
        assert_eq!(c.name(), "Alice");
        assert_eq!(c.phone(), "555");
        assert_eq!(c.fields.get("Email").unwrap(), "a@example.com");
        // The identity key never leaks into the field map.
        assert!(!c.fields.contains_key(FIELD_ID));
    }

    #[test]
    fn test_wire_decode_without_id_then_ensure_id() {
        let json = r#"{"name":"Nobody"}"#;
        let mut c: Contact = serde_json::from_str(json).unwrap();
        assert!(c.id.is_empty());

        c.ensure_id();
        assert!(!c.id.is_empty());

        let mut d: Contact = serde_json::from_str(json).unwrap();
        d.ensure_id();
        assert_ne!(c.id, d.id, "generated ids must be unique");
    }

    #[test]
    fn test_wire_encode_is_flat_and_skips_empty_id() {
        let mut fields = ContactFields::new();
        fields.insert("name".to_string(), "Alice".to_string());
        fields.insert("Email".to_string(), "a@example.com".to_string());

        let with_id = serde_json::to_value(Contact::new("7", fields.clone())).unwrap();
        assert_eq!(with_id["_id"], "7");
        assert_eq!(with_id["name"], "Alice");
        assert_eq!(with_id["Email"], "a@example.com");

        let without_id = serde_json::to_value(Contact::new("", fields)).unwrap();
        assert!(without_id.get("_id").is_none());
    }

    #[test]
    fn test_non_string_field_value_is_a_decode_error() {
        let json = r#"{"_id":"1","name":"Alice","age":30}"#;
        let result: Result<Contact, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_sort_by_name_both_orders() {
        let mut contacts = vec![contact("2", "Bob"), contact("3", "Carol"), contact("1", "Alice")];

        sort_by_name(&mut contacts, SortOrder::Ascending);
        let names: Vec<&str> = contacts.iter().map(Contact::name).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);

        sort_by_name(&mut contacts, SortOrder::Descending);
        let names: Vec<&str> = contacts.iter().map(Contact::name).collect();
        assert_eq!(names, vec!["Carol", "Bob", "Alice"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_names() {
        let mut contacts = vec![contact("first", "Same"), contact("second", "Same")];
        sort_by_name(&mut contacts, SortOrder::Ascending);
        assert_eq!(contacts[0].id, "first");
        sort_by_name(&mut contacts, SortOrder::Descending);
        assert_eq!(contacts[0].id, "first");
    }

    #[test]
    fn test_unique_field_key_counts_up_from_one() {
        let existing = ["name", "phone", "Email"];
        assert_eq!(unique_field_key(existing, "Email"), "Email 1");

        let existing = ["name", "phone", "Email", "Email 1"];
        assert_eq!(unique_field_key(existing, "Email"), "Email 2");
    }

    #[test]
    fn test_unique_field_key_free_name_is_unchanged() {
        let existing = ["name", "phone"];
        assert_eq!(unique_field_key(existing, "Email"), "Email");
    }

    #[test]
    fn test_unique_field_key_fills_gaps_deterministically() {
        // "Email 1" free even though "Email 2" is taken: lowest suffix wins.
        let existing = ["Email", "Email 2"];
        assert_eq!(unique_field_key(existing, "Email"), "Email 1");
    }

    #[test]
    fn test_unique_field_key_guards_reserved_keys() {
        let existing = ["name", "phone"];
        assert_eq!(unique_field_key(existing, "name"), "name 1");
    }
}
