//! Reference lookup tables: cities, furniture types, materials, colors.
//!
//! Fetched from the backend and used for labeling and filter dropdowns. The
//! client never mutates them.

use serde::{Deserialize, Serialize};

use ampunv_core::{CityId, ColorId, FurnitureTypeId, MaterialId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub postal_code: String,
    pub department: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FurnitureType {
    pub id: FurnitureTypeId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub id: ColorId,
    pub name: String,
    pub hex_code: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// All four lookup tables, loaded together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceData {
    pub furniture_types: Vec<FurnitureType>,
    pub materials: Vec<Material>,
    pub colors: Vec<Color>,
    pub cities: Vec<City>,
}

impl ReferenceData {
    pub fn city_name(&self, id: CityId) -> Option<&str> {
        self.cities.iter().find(|c| c.id == id).map(|c| c.name.as_str())
    }

    pub fn furniture_type_name(&self, id: FurnitureTypeId) -> Option<&str> {
        self.furniture_types
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.name.as_str())
    }

    pub fn material_name(&self, id: MaterialId) -> Option<&str> {
        self.materials.iter().find(|m| m.id == id).map(|m| m.name.as_str())
    }

    pub fn color_name(&self, id: ColorId) -> Option<&str> {
        self.colors.iter().find(|c| c.id == id).map(|c| c.name.as_str())
    }
}
