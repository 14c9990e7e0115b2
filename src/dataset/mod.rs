mod loader;
mod record;

pub use loader::{
    LoadSummary, MISSING_SENTINEL, REQUIRED_COLUMNS, load_csv_path, load_csv_reader, load_csv_str,
};
pub use record::{CountryRecord, POPULATION_UNIT, RecordField};

use indexmap::{IndexMap, IndexSet};

use crate::core::Extent;

/// Ordered collection of observations with a per-country row index.
///
/// Rows keep their source order; nothing is sorted or deduplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<CountryRecord>,
    by_country: IndexMap<String, Vec<usize>>,
}

impl Dataset {
    #[must_use]
    pub fn from_records(records: Vec<CountryRecord>) -> Self {
        let mut by_country: IndexMap<String, Vec<usize>> = IndexMap::new();
        for (index, record) in records.iter().enumerate() {
            by_country
                .entry(record.country.clone())
                .or_default()
                .push(index);
        }
        Self {
            records,
            by_country,
        }
    }

    #[must_use]
    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CountryRecord> {
        self.records.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows of one country, in source order.
    pub fn country_rows<'a>(
        &'a self,
        country: &str,
    ) -> impl Iterator<Item = &'a CountryRecord> + 'a {
        self.by_country
            .get(country)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|&index| &self.records[index])
    }

    #[must_use]
    pub fn contains_country(&self, country: &str) -> bool {
        self.by_country.contains_key(country)
    }

    /// Distinct countries in first-seen order.
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.by_country.keys().map(String::as_str)
    }

    /// Distinct year labels in first-seen order.
    #[must_use]
    pub fn years(&self) -> Vec<&str> {
        let years: IndexSet<&str> = self
            .records
            .iter()
            .map(|record| record.year.as_str())
            .collect();
        years.into_iter().collect()
    }

    #[must_use]
    pub fn column(&self, field: RecordField) -> Vec<f64> {
        self.records
            .iter()
            .map(|record| field.value(record))
            .collect()
    }

    #[must_use]
    pub fn extent(&self, field: RecordField) -> Extent {
        Extent::of(self.records.iter().map(|record| field.value(record)))
    }
}

impl FromIterator<CountryRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = CountryRecord>>(iter: I) -> Self {
        Self::from_records(iter.into_iter().collect())
    }
}
