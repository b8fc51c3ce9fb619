//! Validated, immutable item catalog.
//!
//! A catalog is built once and then only read. The compiled-in default lives behind
//! a process-wide `OnceLock`; callers that need another metadata version construct
//! their own catalog and pass it per call.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Serialize;

use crate::catalog::items::default_items;
use crate::domain::{ItemId, ItemMeta, PerAxis, PerTrait, PerType, ResponseSet};
use crate::error::ScoringError;

#[derive(Debug, Clone)]
pub struct ItemCatalog {
    items: Vec<ItemMeta>,
    index: HashMap<ItemId, usize>,
}

impl ItemCatalog {
    /// Validate and index a list of items.
    ///
    /// Rejects empty catalogs, duplicate ids, non-positive or non-finite item
    /// weights, and non-finite loadings.
    pub fn new(items: Vec<ItemMeta>) -> Result<Self, ScoringError> {
        if items.is_empty() {
            return Err(ScoringError::EmptyCatalog);
        }

        let mut index = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            check_item(item)?;
            if index.insert(item.id, pos).is_some() {
                return Err(ScoringError::DuplicateItem(item.id));
            }
        }

        Ok(Self { items, index })
    }

    /// The compiled-in catalog, built on first use and shared read-only.
    pub fn default_catalog() -> &'static ItemCatalog {
        static DEFAULT: OnceLock<ItemCatalog> = OnceLock::new();
        DEFAULT.get_or_init(|| {
            let items = default_items();
            let index = items.iter().enumerate().map(|(pos, item)| (item.id, pos)).collect();
            ItemCatalog { items, index }
        })
    }

    pub fn items(&self) -> &[ItemMeta] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemMeta> {
        self.index.get(&id).map(|&pos| &self.items[pos])
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.index.contains_key(&id)
    }

    /// Fail fast unless the response set answers exactly this catalog's items.
    pub fn check_responses(&self, responses: &ResponseSet) -> Result<(), ScoringError> {
        if let Some((id, _)) = responses.iter().find(|(id, _)| !self.contains(*id)) {
            return Err(ScoringError::UnknownItem(id));
        }
        if responses.len() != self.len() {
            return Err(ScoringError::ResponseCount {
                expected: self.len(),
                actual: responses.len(),
            });
        }
        Ok(())
    }

    /// Coverage statistics for the catalog.
    pub fn audit(&self) -> CatalogAudit {
        let mut per_trait = PerTrait::<usize>::default();
        let mut per_axis = PerAxis::<usize>::default();
        let mut per_type = PerType::<usize>::default();
        let mut reverse_items = 0;

        for item in &self.items {
            if item.reverse {
                reverse_items += 1;
            }
            if let Some(loading) = item.axis {
                *per_axis.get_mut(loading.axis) += 1;
            }
            for (t, w) in item.big5.iter() {
                if w.is_some() {
                    *per_trait.get_mut(t) += 1;
                }
            }
            for (t, w) in item.nine_type.iter() {
                if w.is_some() {
                    *per_type.get_mut(t) += 1;
                }
            }
        }

        let mut warnings = Vec::new();
        for (t, &n) in per_trait.iter() {
            if n == 0 {
                warnings.push(format!("no item loads on {}; it will score neutral", t.display_name()));
            }
        }
        for (axis, &n) in per_axis.iter() {
            if n == 0 {
                warnings.push(format!("no item loads on axis {}; it will score neutral", axis.display_name()));
            }
        }
        for (t, &n) in per_type.iter() {
            if n == 0 {
                warnings.push(format!("no item loads on nine-type {t}; only the prior will drive it"));
            }
        }

        CatalogAudit {
            total_items: self.items.len(),
            reverse_items,
            reverse_ratio: reverse_items as f64 / self.items.len() as f64,
            items_per_trait: per_trait,
            items_per_axis: per_axis,
            items_per_type: per_type,
            warnings,
        }
    }
}

/// Coverage report produced by [`ItemCatalog::audit`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogAudit {
    pub total_items: usize,
    pub reverse_items: usize,
    pub reverse_ratio: f64,
    pub items_per_trait: PerTrait<usize>,
    pub items_per_axis: PerAxis<usize>,
    pub items_per_type: PerType<usize>,
    pub warnings: Vec<String>,
}

fn check_item(item: &ItemMeta) -> Result<(), ScoringError> {
    let invalid = |reason: String| ScoringError::InvalidItem { id: item.id, reason };

    if !(item.weight.is_finite() && item.weight > 0.0) {
        return Err(invalid(format!("weight must be finite and > 0, got {}", item.weight)));
    }
    for (t, w) in item.big5.iter() {
        if let Some(w) = w {
            if !w.is_finite() {
                return Err(invalid(format!("non-finite {} loading", t.display_name())));
            }
        }
    }
    for (t, w) in item.nine_type.iter() {
        if let Some(w) = w {
            if !w.is_finite() {
                return Err(invalid(format!("non-finite nine-type {t} loading")));
            }
        }
    }
    Ok(())
}
