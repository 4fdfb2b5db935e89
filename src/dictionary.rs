//! Reference dictionary
//!
//! Built once at startup from a CSV file, then shared read-only by every match
//! request.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::matcher::normalize;

/// Dictionary entry (immutable after construction)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    product: String,
    brand: String,
    category: String,
    /// Normalized product text, computed once
    normalized_product: String,
    /// Token count of `normalized_product`
    token_count: usize,
}

impl DictionaryEntry {
    pub fn new(
        product: impl Into<String>,
        brand: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let product = product.into();
        let normalized_product = normalize(&product);
        let token_count = normalized_product.split_whitespace().count();
        Self {
            product,
            brand: brand.into(),
            category: category.into(),
            normalized_product,
            token_count,
        }
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn normalized_product(&self) -> &str {
        &self.normalized_product
    }

    pub fn token_count(&self) -> usize {
        self.token_count
    }
}

/// Ordered, read-only collection of entries
///
/// Order decides ties when scoring: the earlier entry wins.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: Vec<DictionaryEntry>,
}

/// Column positions of product / brand / category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    product: usize,
    brand: usize,
    category: usize,
}

impl ColumnMap {
    /// Map header names case-insensitively, falling back to positions 0, 1, 2
    fn from_headers<'h>(headers: impl IntoIterator<Item = &'h str>) -> Self {
        let index: HashMap<String, usize> = headers
            .into_iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_lowercase(), i))
            .collect();

        Self {
            product: index.get("product").copied().unwrap_or(0),
            brand: index.get("brand").copied().unwrap_or(1),
            category: index.get("category").copied().unwrap_or(2),
        }
    }

    /// Minimum field count a row needs to supply all three columns
    fn required_len(&self) -> usize {
        self.product.max(self.brand).max(self.category) + 1
    }
}

impl Dictionary {
    pub fn from_entries(entries: Vec<DictionaryEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DictionaryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a dictionary from a CSV file with a header row
    pub fn load_csv(path: &Path) -> Result<Self> {
        tracing::info!("Loading dictionary from: {:?}", path);

        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open dictionary file {:?}", path))?;
        let (dictionary, dropped) = Self::from_csv_reader(file)
            .with_context(|| format!("Failed to read dictionary file {:?}", path))?;

        if dropped > 0 {
            tracing::warn!("Dropped {} incomplete dictionary rows", dropped);
        }
        tracing::info!("Dictionary loaded with {} items.", dictionary.len());

        Ok(dictionary)
    }

    /// Parse CSV data with a header row
    ///
    /// Returns the dictionary and the number of dropped rows. A row is
    /// dropped when it lacks one of the mapped columns or its product is
    /// blank. Fields that are not valid UTF-8 are decoded lossily.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<(Self, usize)> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .byte_headers()?
            .iter()
            .map(|h| String::from_utf8_lossy(h).into_owned())
            .collect();
        let columns = ColumnMap::from_headers(headers.iter().map(String::as_str));
        let required_len = columns.required_len();

        let mut entries = Vec::new();
        let mut dropped = 0;

        for (row_idx, result) in reader.byte_records().enumerate() {
            let record =
                result.with_context(|| format!("CSV parse error at row {}", row_idx + 2))?;

            if record.len() < required_len {
                dropped += 1;
                continue;
            }

            let product = String::from_utf8_lossy(&record[columns.product]);
            if product.trim().is_empty() {
                dropped += 1;
                continue;
            }

            entries.push(DictionaryEntry::new(
                product,
                String::from_utf8_lossy(&record[columns.brand]),
                String::from_utf8_lossy(&record[columns.category]),
            ));
        }

        Ok((Self::from_entries(entries), dropped))
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = &'a DictionaryEntry;
    type IntoIter = std::slice::Iter<'a, DictionaryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
