//! Validated person records.
//!
//! A [`Person`] is the normalized form of one input row. Records are
//! immutable once built; every later stage borrows them.

use indexmap::IndexSet;
use serde::Serialize;

use crate::identifier::Id;

/// Free-form labels attached to a person.
///
/// Tags are stored lower-cased, without surrounding whitespace, and keep the
/// order in which they first appeared. They are passthrough metadata: no
/// pipeline stage interprets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tags(IndexSet<String>);

impl Tags {
    /// Parses a comma-separated tag list.
    ///
    /// # Examples
    ///
    /// ```
    /// # use orgchart_core::person::Tags;
    /// let tags = Tags::parse(" Engineering, remote,,ENGINEERING ");
    /// let collected: Vec<&str> = tags.iter().collect();
    /// assert_eq!(collected, vec!["engineering", "remote"]);
    /// ```
    pub fn parse(raw: &str) -> Self {
        raw.split(',')
            .map(|tag| tag.trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect()
    }

    /// Returns `true` if the tag set contains `tag` (compared lower-cased).
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(&tag.to_lowercase())
    }

    /// Returns an iterator over the tags in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the number of distinct tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no tags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for Tags {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A single member of the organization.
///
/// # Examples
///
/// ```
/// # use orgchart_core::{identifier::Id, person::{Person, Tags}};
/// let person = Person::new(Id::new("ada"), "Ada Lovelace")
///     .with_manager(Id::new("charles"))
///     .with_image_ref("https://example.com/ada.png")
///     .with_tags(Tags::parse("math,engine"));
///
/// assert_eq!(person.id(), "ada");
/// assert_eq!(person.manager_id(), Some(&Id::new("charles")));
/// assert_eq!(person.tags().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    id: Id,
    name: String,
    manager_id: Option<Id>,
    image_ref: String,
    tags: Tags,
}

impl Person {
    /// Creates a person with no manager, no image and no tags.
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            manager_id: None,
            image_ref: String::new(),
            tags: Tags::default(),
        }
    }

    /// Sets the manager reference.
    pub fn with_manager(mut self, manager_id: Id) -> Self {
        self.manager_id = Some(manager_id);
        self
    }

    /// Sets the opaque image reference (URL or path).
    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = image_ref.into();
        self
    }

    /// Sets the tag set.
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// Returns a copy of this person with the manager reference removed.
    pub fn without_manager(&self) -> Self {
        Self {
            manager_id: None,
            ..self.clone()
        }
    }

    /// Returns the unique person id.
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the manager reference, if any.
    pub fn manager_id(&self) -> Option<&Id> {
        self.manager_id.as_ref()
    }

    /// Returns the image reference; empty when none was supplied.
    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    /// Returns the tag set.
    pub fn tags(&self) -> &Tags {
        &self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_parse_normalizes() {
        let tags = Tags::parse("Sales , EMEA,  ,sales");
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["sales", "emea"]);
        assert!(tags.contains("Sales"));
        assert!(!tags.contains("apac"));
    }

    #[test]
    fn test_tags_parse_empty() {
        assert!(Tags::parse("").is_empty());
        assert!(Tags::parse(" , ,").is_empty());
    }

    #[test]
    fn test_tags_serialize_as_list() {
        let tags = Tags::parse("b,a");
        assert_eq!(serde_json::to_string(&tags).unwrap(), r#"["b","a"]"#);
    }

    #[test]
    fn test_person_defaults() {
        let person = Person::new(Id::new("root"), "Root");
        assert_eq!(person.name(), "Root");
        assert_eq!(person.manager_id(), None);
        assert_eq!(person.image_ref(), "");
        assert!(person.tags().is_empty());
    }

    #[test]
    fn test_without_manager() {
        let person = Person::new(Id::new("x"), "X").with_manager(Id::new("y"));
        let demoted = person.without_manager();

        assert_eq!(demoted.manager_id(), None);
        assert_eq!(demoted.id(), person.id());
        assert_eq!(person.manager_id(), Some(&Id::new("y")));
    }
}
