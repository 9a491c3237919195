//! Read-through cache for the reference lookup tables.
//!
//! All four tables load together on first access and are reused until
//! invalidated. The tables change rarely; staleness within a page load is
//! acceptable.

use ampunv_catalog::ReferenceData;

use crate::error::ApiError;
use crate::gateway::ReferenceApi;

#[derive(Debug)]
pub struct ReferenceCache<G> {
    gateway: G,
    cached: Option<ReferenceData>,
}

impl<G: ReferenceApi> ReferenceCache<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            cached: None,
        }
    }

    /// The reference bundle, fetching on first access.
    pub async fn get(&mut self) -> Result<&ReferenceData, ApiError> {
        let data = match self.cached.take() {
            Some(data) => data,
            None => ReferenceData {
                furniture_types: self.gateway.furniture_types().await?,
                materials: self.gateway.materials().await?,
                colors: self.gateway.colors().await?,
                cities: self.gateway.cities().await?,
            },
        };
        Ok(self.cached.insert(data))
    }

    /// Force the next access to reload.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ampunv_catalog::reference::{City, Color, FurnitureType, Material};
    use ampunv_core::{CityId, FurnitureTypeId};
    use std::sync::Mutex;

    struct FakeReferenceApi {
        loads: Mutex<u32>,
    }

    impl ReferenceApi for &FakeReferenceApi {
        async fn cities(&self) -> Result<Vec<City>, ApiError> {
            *self.loads.lock().unwrap() += 1;
            Ok(vec![City {
                id: CityId::new(10),
                name: "Lyon".into(),
                postal_code: "69000".into(),
                department: "Rhône".into(),
            }])
        }

        async fn furniture_types(&self) -> Result<Vec<FurnitureType>, ApiError> {
            Ok(vec![FurnitureType {
                id: FurnitureTypeId::new(1),
                name: "Table".into(),
                description: None,
            }])
        }

        async fn materials(&self) -> Result<Vec<Material>, ApiError> {
            Ok(vec![])
        }

        async fn colors(&self) -> Result<Vec<Color>, ApiError> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn second_access_reuses_the_cached_bundle() {
        let api = FakeReferenceApi { loads: Mutex::new(0) };
        let mut cache = ReferenceCache::new(&api);

        let first = cache.get().await.unwrap();
        assert_eq!(first.city_name(CityId::new(10)), Some("Lyon"));
        let _second = cache.get().await.unwrap();

        assert_eq!(*api.loads.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn invalidate_forces_a_reload() {
        let api = FakeReferenceApi { loads: Mutex::new(0) };
        let mut cache = ReferenceCache::new(&api);

        cache.get().await.unwrap();
        cache.invalidate();
        cache.get().await.unwrap();

        assert_eq!(*api.loads.lock().unwrap(), 2);
    }
}
