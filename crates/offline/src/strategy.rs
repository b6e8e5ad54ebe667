//! Fetch-routing policy for the offline shell.
//!
//! Pure classification: request shape in, caching strategy out.

/// Cache holding the pre-cached app shell. Bump the version suffix to force a
/// refresh on deploy.
pub const SHELL_CACHE: &str = "stock-system-v1";

/// Cache holding runtime-cached third-party responses.
pub const RUNTIME_CACHE: &str = "stock-runtime-v1";

/// URLs pre-cached when the shell installs.
pub const PRECACHE_URLS: [&str; 6] = [
    "/",
    "/index.html",
    "/manifest.json",
    "/icons/icon-192.png",
    "/icons/icon-512.png",
    "/icons/apple-touch-icon.png",
];

/// Third-party origins whose responses are cached at runtime (fonts, QR
/// images).
pub const CACHEABLE_ORIGINS: [&str; 3] = [
    "https://fonts.googleapis.com",
    "https://fonts.gstatic.com",
    "https://api.qrserver.com",
];

/// Resource type a fetch is for (the request's `destination`).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Destination {
    Document,
    Script,
    Style,
    Image,
    Font,
    Media,
    Other,
}

/// How the shell serves a fetch.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FetchStrategy {
    /// Straight to the network; the response is never cached.
    NetworkOnly,
    /// Network, falling back to the cached app shell when offline.
    NetworkFirst,
    /// Cache, filling it from the network on a miss.
    CacheFirst,
    /// Serve from cache immediately and refresh it in the background.
    StaleWhileRevalidate,
}

/// A fetch request, reduced to the fields the routing policy looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest<'a> {
    /// HTTP method ("GET", "POST", ...).
    pub method: &'a str,
    /// Full request URL.
    pub url: &'a str,
    /// Whether the request targets the app's own origin.
    pub same_origin: bool,
    /// Whether this is a navigation (SPA document load).
    pub is_navigation: bool,
    pub destination: Destination,
}

/// Decide how the shell serves a request.
pub fn strategy_for(request: &FetchRequest<'_>) -> FetchStrategy {
    // Only idempotent http(s) GETs are ever cached.
    if request.method != "GET" || !request.url.starts_with("http") {
        return FetchStrategy::NetworkOnly;
    }

    if request.is_navigation {
        return FetchStrategy::NetworkFirst;
    }

    // Camera/media streams must never be served from cache.
    if request.destination == Destination::Media {
        return FetchStrategy::NetworkOnly;
    }

    if CACHEABLE_ORIGINS
        .iter()
        .any(|origin| request.url.starts_with(origin))
    {
        return FetchStrategy::CacheFirst;
    }

    if request.same_origin && is_static_asset(request) {
        return FetchStrategy::CacheFirst;
    }

    FetchStrategy::NetworkOnly
}

/// True for caches a newly activated shell version should delete.
pub fn is_stale_cache(name: &str) -> bool {
    name != SHELL_CACHE && name != RUNTIME_CACHE
}

fn is_static_asset(request: &FetchRequest<'_>) -> bool {
    matches!(
        request.destination,
        Destination::Script | Destination::Style | Destination::Image | Destination::Font
    ) || has_extension(request.url, ".js")
        || has_extension(request.url, ".css")
}

fn has_extension(url: &str, ext: &str) -> bool {
    // Compare against the path only, ignoring query and fragment.
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.ends_with(ext)
}
