pub mod listing;
pub mod model;

// Re-export commonly used types/functions for consumers
pub use listing::{render_text, ListingRow, Report};
pub use model::{load_image, Image};
