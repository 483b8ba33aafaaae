use std::{
    hash::Hasher,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use fxhash::FxHasher64;
use halcon_fare::{coordinate::Coordinate, route_metrics::RouteMetrics};
use tracing::{debug, warn};

use crate::{error::ProviderError, routing_provider::RoutingProvider};

fn hash_coordinate<H: Hasher>(coordinate: &Coordinate, hasher: &mut H) {
    hasher.write_u64(coordinate.lat().to_bits());
    hasher.write_u64(coordinate.lon().to_bits());
}

fn get_filename(origin: &Coordinate, destination: &Coordinate, profile: &str) -> String {
    let mut hasher = FxHasher64::default();

    hash_coordinate(origin, &mut hasher);
    hash_coordinate(destination, &mut hasher);
    hasher.write(profile.as_bytes());

    format!("{:016x}.json", hasher.finish())
}

/// Routes stored as one JSON file per (origin, destination, profile).
pub struct FileRouteCache {
    folder: PathBuf,
}

impl FileRouteCache {
    pub fn new<P: AsRef<Path>>(folder: P) -> Result<Self, anyhow::Error> {
        let folder = folder.as_ref();
        if !folder.is_dir() {
            return Err(anyhow::anyhow!(format!(
                "Path {} is not a directory",
                folder.display()
            )));
        }

        Ok(Self {
            folder: folder.to_path_buf(),
        })
    }

    pub fn get(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        profile: &str,
    ) -> Result<Option<RouteMetrics>, anyhow::Error> {
        let file_path = self.folder.join(get_filename(origin, destination, profile));

        if !file_path.is_file() {
            return Ok(None);
        }

        let file = std::fs::File::open(file_path)?;
        let route: RouteMetrics = serde_json::from_reader(std::io::BufReader::new(file))?;

        Ok(Some(route))
    }

    pub fn put(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        profile: &str,
        route: &RouteMetrics,
    ) -> Result<(), anyhow::Error> {
        let file_path = self.folder.join(get_filename(origin, destination, profile));

        let file = std::fs::File::create(file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, route)?;
        writer.flush()?;

        Ok(())
    }
}

/// Consults the cache before asking `inner`. Cache failures are logged and
/// never fail a routing request.
pub struct CachedRouter<R> {
    inner: R,
    cache: Option<FileRouteCache>,
    profile: String,
}

impl<R: RoutingProvider> CachedRouter<R> {
    pub fn new(inner: R, cache: Option<FileRouteCache>, profile: impl Into<String>) -> Self {
        Self {
            inner,
            cache,
            profile: profile.into(),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: RoutingProvider> RoutingProvider for CachedRouter<R> {
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteMetrics, ProviderError> {
        let Some(cache) = &self.cache else {
            return self.inner.route(origin, destination).await;
        };

        match cache.get(&origin, &destination, &self.profile) {
            Ok(Some(route)) => {
                debug!("[CACHE HIT] {} -> {}", origin, destination);
                return Ok(route);
            }
            Ok(None) => {}
            Err(error) => warn!("Could not read cached route: {}", error),
        }

        let route = self.inner.route(origin, destination).await?;

        if let Err(error) = cache.put(&origin, &destination, &self.profile, &route) {
            warn!("Could not cache route: {}", error);
        }

        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use crate::memory::InMemoryRouter;

    use super::*;

    fn cache_folder(name: &str) -> PathBuf {
        let folder = std::env::temp_dir().join(format!(
            "halcon-route-cache-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&folder);
        std::fs::create_dir_all(&folder).unwrap();
        folder
    }

    fn coordinate(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn test_filename_depends_on_direction_and_profile() {
        let a = coordinate(4.60, -74.08);
        let b = coordinate(4.65, -74.05);

        assert_eq!(get_filename(&a, &b, "driving-car"), get_filename(&a, &b, "driving-car"));
        assert_ne!(get_filename(&a, &b, "driving-car"), get_filename(&b, &a, "driving-car"));
        assert_ne!(get_filename(&a, &b, "driving-car"), get_filename(&a, &b, "foot-walking"));
    }

    #[test]
    fn test_rejects_missing_folder() {
        assert!(FileRouteCache::new("/definitely/not/a/folder/halcon").is_err());
    }

    #[test]
    fn test_put_then_get() {
        let folder = cache_folder("put-get");
        let cache = FileRouteCache::new(&folder).unwrap();
        let a = coordinate(4.60, -74.08);
        let b = coordinate(4.65, -74.05);
        let route = RouteMetrics::new(7200.0, 960.0, vec![a, b]).unwrap();

        assert!(cache.get(&a, &b, "driving-car").unwrap().is_none());
        cache.put(&a, &b, "driving-car", &route).unwrap();
        assert_eq!(cache.get(&a, &b, "driving-car").unwrap(), Some(route));

        std::fs::remove_dir_all(folder).unwrap();
    }

    #[tokio::test]
    async fn test_cached_router_skips_inner_on_hit() {
        let folder = cache_folder("router");
        let a = coordinate(4.60, -74.08);
        let b = coordinate(4.65, -74.05);
        let route = RouteMetrics::new(7200.0, 960.0, vec![a, b]).unwrap();

        let router = CachedRouter::new(
            InMemoryRouter::default().with_route(a, b, route.clone()),
            Some(FileRouteCache::new(&folder).unwrap()),
            "driving-car",
        );

        assert_eq!(router.route(a, b).await.unwrap(), route);
        assert_eq!(router.route(a, b).await.unwrap(), route);
        assert_eq!(router.inner().calls(), 1);

        std::fs::remove_dir_all(folder).unwrap();
    }

    #[tokio::test]
    async fn test_invalid_cached_route_is_refetched() {
        let folder = cache_folder("invalid");
        let a = coordinate(4.60, -74.08);
        let b = coordinate(4.65, -74.05);
        std::fs::write(
            folder.join(get_filename(&a, &b, "driving-car")),
            r#"{"distance": -5000.0, "duration": "PT1M", "polyline": []}"#,
        )
        .unwrap();

        let cache = FileRouteCache::new(&folder).unwrap();
        assert!(cache.get(&a, &b, "driving-car").is_err());

        let route = RouteMetrics::new(7200.0, 960.0, vec![a, b]).unwrap();
        let router = CachedRouter::new(
            InMemoryRouter::default().with_route(a, b, route.clone()),
            Some(cache),
            "driving-car",
        );

        assert_eq!(router.route(a, b).await.unwrap(), route);
        assert_eq!(router.inner().calls(), 1);
        assert_eq!(router.route(a, b).await.unwrap(), route);
        assert_eq!(router.inner().calls(), 1);

        std::fs::remove_dir_all(folder).unwrap();
    }

    #[tokio::test]
    async fn test_cached_router_without_cache() {
        let a = coordinate(4.60, -74.08);
        let b = coordinate(4.65, -74.05);
        let route = RouteMetrics::new(7200.0, 960.0, vec![]).unwrap();
        let router = CachedRouter::new(
            InMemoryRouter::default().with_route(a, b, route),
            None,
            "driving-car",
        );

        router.route(a, b).await.unwrap();
        router.route(a, b).await.unwrap();
        assert_eq!(router.inner().calls(), 2);
    }
}
