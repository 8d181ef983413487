//! Department catalogue used as the sampling universe for generated users.

use std::collections::HashSet;

use crate::error::CatalogueError;

/// Department labels assigned to generated users, in catalogue order.
pub const DEPARTMENTS: [&str; 13] = [
    "Hardware",
    "Plumbing",
    "Flooring",
    "Paint",
    "Millwork",
    "Building Material",
    "Electrical",
    "Home Decor",
    "Inside Lawn & Garden",
    "Outside Lawn & Garden",
    "Appliances",
    "Cabinets",
    "Pro Department",
];

/// Ordered, immutable set of distinct department labels.
///
/// ## Invariants
/// - Contains at least one label.
/// - No label is blank and no label appears twice.
///
/// # Examples
///
/// ```
/// use user_stub_data::{DEPARTMENTS, DepartmentCatalogue};
///
/// let catalogue = DepartmentCatalogue::standard();
/// assert_eq!(catalogue.len(), DEPARTMENTS.len());
/// assert!(catalogue.contains("Plumbing"));
///
/// assert!(DepartmentCatalogue::new(["Paint", "Paint"]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentCatalogue {
    labels: Vec<String>,
}

impl DepartmentCatalogue {
    /// Build the standard thirteen-department catalogue.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            labels: DEPARTMENTS.iter().map(|label| (*label).to_owned()).collect(),
        }
    }

    /// Build a catalogue from custom labels.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError`] when no labels are supplied, a label is
    /// blank, or a label is repeated.
    pub fn new<I, S>(labels: I) -> Result<Self, CatalogueError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(CatalogueError::Empty);
        }

        let mut seen = HashSet::with_capacity(labels.len());
        for (index, label) in labels.iter().enumerate() {
            if label.trim().is_empty() {
                return Err(CatalogueError::BlankLabel { index });
            }
            if !seen.insert(label.as_str()) {
                return Err(CatalogueError::DuplicateLabel {
                    label: label.clone(),
                });
            }
        }

        Ok(Self { labels })
    }

    /// Labels in catalogue order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of labels in the catalogue.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always `false` for a constructed catalogue.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Return `true` when `label` belongs to the catalogue.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|known| known == label)
    }
}

impl Default for DepartmentCatalogue {
    fn default() -> Self {
        Self::standard()
    }
}
