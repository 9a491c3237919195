//! Catalog filtering. Pure functions over a fetched listing slice.

use ampunv_core::{CityId, ColorId, FurnitureTypeId, MaterialId, Price};

use crate::furniture::Furniture;

/// Buyer-side catalog filter. Empty filter matches every listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    /// Case-insensitive match against title and description.
    pub keyword: Option<String>,
    pub furniture_type: Option<FurnitureTypeId>,
    pub material: Option<MaterialId>,
    pub color: Option<ColorId>,
    pub city: Option<CityId>,
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
}

impl CatalogFilter {
    pub fn matches(&self, listing: &Furniture) -> bool {
        if let Some(keyword) = &self.keyword {
            let needle = keyword.trim().to_lowercase();
            if !needle.is_empty() {
                let haystack =
                    format!("{} {}", listing.title, listing.description).to_lowercase();
                if !haystack.contains(&needle) {
                    return false;
                }
            }
        }
        if self.furniture_type.is_some_and(|t| listing.furniture_type_id != t) {
            return false;
        }
        if self.material.is_some() && self.material != listing.material_id {
            return false;
        }
        if self.color.is_some() && self.color != listing.color_id {
            return false;
        }
        if self.city.is_some_and(|c| listing.city_id != c) {
            return false;
        }
        if self.min_price.is_some_and(|min| listing.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| listing.price > max) {
            return false;
        }
        true
    }

    /// Apply over a fetched slice, preserving order.
    pub fn apply<'a>(&self, listings: &'a [Furniture]) -> Vec<&'a Furniture> {
        listings.iter().filter(|l| self.matches(l)).collect()
    }

    /// The buyer-facing catalog: approved listings passing the filter.
    pub fn apply_public<'a>(&self, listings: &'a [Furniture]) -> Vec<&'a Furniture> {
        listings
            .iter()
            .filter(|l| l.status.is_publicly_visible() && self.matches(l))
            .collect()
    }
}
