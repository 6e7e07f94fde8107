mod adapter;
mod controller;
mod registry;

pub use controller::{AdjustOutcome, WidgetController};
pub use registry::WidgetRegistry;
