//! Domain types for twapbench

pub mod fill;
pub mod sample;
pub mod window;

pub use fill::FillRecord;
pub use sample::Sample;
pub use window::ExecutionWindow;
