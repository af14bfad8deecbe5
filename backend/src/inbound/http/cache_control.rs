//! Shared cache-control policies for HTTP handlers.

/// Cart views are per-client and change on every mutation.
pub const PRIVATE_NO_CACHE_MUST_REVALIDATE: &str = "private, no-cache, must-revalidate";

/// The menu is shared by all clients but may be swapped by operators.
pub const PUBLIC_SHORT_LIVED: &str = "public, max-age=60";

/// Header tuple for per-client responses.
pub const fn private_no_cache_header() -> (&'static str, &'static str) {
    ("Cache-Control", PRIVATE_NO_CACHE_MUST_REVALIDATE)
}

/// Header tuple for the shared menu response.
pub const fn public_short_lived_header() -> (&'static str, &'static str) {
    ("Cache-Control", PUBLIC_SHORT_LIVED)
}
