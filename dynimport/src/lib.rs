pub mod cache;
pub mod classify;
pub mod error;
pub mod glob_resolve;
pub mod module_map;
pub mod normalize;
pub mod options;
pub mod plugin;
pub mod rewrite;
pub mod scan;

#[cfg(test)]
mod classify_test;
