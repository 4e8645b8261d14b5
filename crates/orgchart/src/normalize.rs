//! Record normalization.
//!
//! Turns raw input rows into validated [`Person`] records. This is the only
//! stage that looks at column names; every later stage works on people.
//!
//! Validation happens in two passes over the rows:
//!
//! 1. Identity: every row must carry a non-empty id and no id may repeat.
//!    Duplicates are reported even if the rows are malformed otherwise.
//! 2. Content: every row must carry a non-empty name. Manager, image and
//!    tags are optional; empty cells and absent columns read as absent.

use std::collections::{HashMap, hash_map::Entry};

use log::{debug, info, trace};

use orgchart_core::{
    identifier::Id,
    person::{Person, Tags},
    row::RawRow,
};

use crate::{
    config::ColumnMapping,
    error::{RequiredField, ValidationError},
};

/// Converts raw rows into [`Person`] records using a [`ColumnMapping`].
#[derive(Debug, Clone, Copy)]
pub struct RecordNormalizer<'a> {
    columns: &'a ColumnMapping,
}

impl<'a> RecordNormalizer<'a> {
    /// Creates a normalizer reading the given columns.
    pub fn new(columns: &'a ColumnMapping) -> Self {
        Self { columns }
    }

    /// Normalizes `rows` into people, preserving input order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for the first problem found:
    /// - a row without an id, or with an id already used by an earlier row,
    /// - a row without a name.
    ///
    /// # Examples
    ///
    /// ```
    /// # use orgchart::{config::ColumnMapping, normalize::RecordNormalizer};
    /// # use orgchart_core::row::RawRow;
    /// let columns = ColumnMapping::default();
    /// let rows = vec![
    ///     RawRow::new()
    ///         .with("Handle", "ada")
    ///         .with("Name", "Ada")
    ///         .with("Tags", "Math, Engines"),
    /// ];
    ///
    /// let people = RecordNormalizer::new(&columns).normalize(&rows).unwrap();
    /// assert_eq!(people[0].id(), "ada");
    /// assert_eq!(people[0].manager_id(), None);
    /// assert!(people[0].tags().contains("engines"));
    /// ```
    pub fn normalize(&self, rows: &[RawRow]) -> Result<Vec<Person>, ValidationError> {
        info!(rows = rows.len(); "Normalizing rows");

        let ids = self.collect_ids(rows)?;

        let people = rows
            .iter()
            .zip(ids)
            .enumerate()
            .map(|(row_idx, (row, id))| self.person_from_row(row_idx, row, id))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(people = people.len(); "Rows normalized");
        Ok(people)
    }

    /// Reads every row's id, rejecting empty and repeated ids.
    fn collect_ids(&self, rows: &[RawRow]) -> Result<Vec<Id>, ValidationError> {
        let mut first_seen: HashMap<Id, usize> = HashMap::with_capacity(rows.len());
        let mut ids = Vec::with_capacity(rows.len());

        for (row_idx, row) in rows.iter().enumerate() {
            let id = row
                .text(self.columns.id())
                .map(Id::from)
                .ok_or_else(|| ValidationError::MissingField {
                    row: row_idx,
                    field: RequiredField::Id,
                    column: self.columns.id().to_string(),
                })?;

            match first_seen.entry(id) {
                Entry::Occupied(entry) => {
                    return Err(ValidationError::DuplicateId {
                        row: row_idx,
                        id: entry.key().clone(),
                        first_row: *entry.get(),
                    });
                }
                Entry::Vacant(entry) => {
                    ids.push(entry.key().clone());
                    entry.insert(row_idx);
                }
            }
        }

        Ok(ids)
    }

    fn person_from_row(
        &self,
        row_idx: usize,
        row: &RawRow,
        id: Id,
    ) -> Result<Person, ValidationError> {
        let name = row
            .text(self.columns.name())
            .ok_or_else(|| ValidationError::MissingField {
                row: row_idx,
                field: RequiredField::Name,
                column: self.columns.name().to_string(),
            })?;

        let mut person = Person::new(id, name);
        if let Some(manager) = row.text(self.columns.manager()) {
            person = person.with_manager(Id::from(manager));
        }
        if let Some(image) = row.text(self.columns.image()) {
            person = person.with_image_ref(image);
        }
        if let Some(tags) = row.text(self.columns.tags()) {
            person = person.with_tags(Tags::parse(&tags));
        }

        trace!(row = row_idx, person:?; "Normalized row");
        Ok(person)
    }
}
