// Config-driven report engine: path resolution, range classification, assembly.
// Pure functions over static configs and read-only records; no I/O beyond startup loading.

pub mod classify;
pub mod config;
pub mod handlers;
pub mod path;
pub mod report;
pub mod store;

pub use config::ConfigRegistry;
pub use report::assemble_report;
pub use store::AssessmentStore;
