//! Hash map used for keyed lookups. `FxHashMap` by default, the std map with
//! the `std-hash` feature.

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use rustc_hash::FxHashMap as HashMap;
}

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::HashMap;
}
