//! Store domain types and the partial-update merge policy.

use storemap_core::{Coordinates, StoreId};

/// A store branch (domain type).
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    /// Surrogate key. External lookups use `name`; the update statement
    /// is keyed by this id so a concurrent rename or delete between
    /// fetch and update surfaces as zero rows affected.
    pub id: StoreId,
    /// Branch name, unique among live records.
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub open_hours: Option<String>,
    pub district: String,
    pub location: Coordinates,
    /// Optional image reference.
    pub image: Option<String>,
}

/// Data for creating a new store.
#[derive(Debug, Clone)]
pub struct NewStore {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub open_hours: String,
    pub district: String,
    pub location: Coordinates,
    pub image: Option<String>,
}

/// Optional search filters for store listing.
///
/// Both filters combine with logical AND. The name filter is
/// case-insensitive containment; the district filter is an exact match.
#[derive(Debug, Clone, Default)]
pub struct StoreFilter {
    pub name_contains: Option<String>,
    pub district: Option<String>,
}

impl StoreFilter {
    /// Build a filter from raw query parameters.
    ///
    /// Empty strings are treated as absent, matching the truthiness check
    /// the search endpoint has always applied to its query parameters.
    #[must_use]
    pub fn from_params(q: Option<String>, district: Option<String>) -> Self {
        Self {
            name_contains: q.filter(|s| !s.is_empty()),
            district: district.filter(|s| !s.is_empty()),
        }
    }

    /// Whether no filter terms are present (list-all).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name_contains.is_none() && self.district.is_none()
    }
}

/// Caller-supplied values for a partial update.
///
/// `name` and `location` are always applied. The optional fields follow
/// the replace-only-with-non-empty-override policy (see
/// [`Store::merged_with`]).
#[derive(Debug, Clone)]
pub struct StoreUpdate {
    pub name: String,
    pub location: Coordinates,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub open_hours: Option<String>,
    pub district: Option<String>,
    pub image: Option<String>,
}

impl Store {
    /// Merge caller-supplied update values over this record.
    ///
    /// For each optional field the new value is the caller's value only
    /// if it is present AND non-empty; otherwise the stored value is
    /// kept. An explicit empty string does NOT clear a field. `name` and
    /// `location` are always overwritten.
    #[must_use]
    pub fn merged_with(&self, update: &StoreUpdate) -> Self {
        Self {
            id: self.id,
            name: update.name.clone(),
            address: override_if_non_empty(update.address.as_deref(), self.address.as_deref()),
            phone: override_if_non_empty(update.phone.as_deref(), self.phone.as_deref()),
            open_hours: override_if_non_empty(
                update.open_hours.as_deref(),
                self.open_hours.as_deref(),
            ),
            district: match update.district.as_deref() {
                Some(d) if !d.is_empty() => d.to_owned(),
                _ => self.district.clone(),
            },
            location: update.location,
            image: override_if_non_empty(update.image.as_deref(), self.image.as_deref()),
        }
    }
}

/// Replace-only-with-non-empty-override merge for one field.
fn override_if_non_empty(candidate: Option<&str>, current: Option<&str>) -> Option<String> {
    match candidate {
        Some(v) if !v.is_empty() => Some(v.to_owned()),
        _ => current.map(str::to_owned),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn existing() -> Store {
        Store {
            id: StoreId::new(1),
            name: "Store A".to_owned(),
            address: Some("1 Main St".to_owned()),
            phone: Some("0123".to_owned()),
            open_hours: Some("8-17".to_owned()),
            district: "North".to_owned(),
            location: Coordinates::new(105.0, 21.0).unwrap(),
            image: Some("a.jpg".to_owned()),
        }
    }

    fn bare_update() -> StoreUpdate {
        StoreUpdate {
            name: "Store A".to_owned(),
            location: Coordinates::new(106.0, 20.0).unwrap(),
            address: None,
            phone: None,
            open_hours: None,
            district: None,
            image: None,
        }
    }

    #[test]
    fn test_merge_keeps_stored_values_when_fields_absent() {
        let merged = existing().merged_with(&bare_update());
        assert_eq!(merged.address.as_deref(), Some("1 Main St"));
        assert_eq!(merged.phone.as_deref(), Some("0123"));
        assert_eq!(merged.open_hours.as_deref(), Some("8-17"));
        assert_eq!(merged.district, "North");
        assert_eq!(merged.image.as_deref(), Some("a.jpg"));
    }

    #[test]
    fn test_merge_empty_string_does_not_clear() {
        let mut update = bare_update();
        update.address = Some(String::new());
        update.district = Some(String::new());
        update.image = Some(String::new());

        let merged = existing().merged_with(&update);
        assert_eq!(merged.address.as_deref(), Some("1 Main St"));
        assert_eq!(merged.district, "North");
        assert_eq!(merged.image.as_deref(), Some("a.jpg"));
    }

    #[test]
    fn test_merge_non_empty_override_replaces() {
        let mut update = bare_update();
        update.phone = Some("0999".to_owned());
        update.district = Some("South".to_owned());

        let merged = existing().merged_with(&update);
        assert_eq!(merged.phone.as_deref(), Some("0999"));
        assert_eq!(merged.district, "South");
        // Untouched fields keep stored values
        assert_eq!(merged.address.as_deref(), Some("1 Main St"));
    }

    #[test]
    fn test_merge_always_applies_name_and_location() {
        let mut update = bare_update();
        update.name = "Store B".to_owned();

        let merged = existing().merged_with(&update);
        assert_eq!(merged.name, "Store B");
        assert_eq!(merged.location, Coordinates::new(106.0, 20.0).unwrap());
        assert_eq!(merged.id, StoreId::new(1));
    }

    #[test]
    fn test_filter_from_params_treats_empty_as_absent() {
        let filter = StoreFilter::from_params(Some(String::new()), Some(String::new()));
        assert!(filter.is_empty());

        let filter = StoreFilter::from_params(Some("store".to_owned()), None);
        assert_eq!(filter.name_contains.as_deref(), Some("store"));
        assert!(filter.district.is_none());
        assert!(!filter.is_empty());
    }
}
