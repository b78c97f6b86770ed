// Platform-specific code module

pub mod priority;

pub use priority::process_nice;
