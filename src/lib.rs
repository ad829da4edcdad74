pub use bindery_core::*;
