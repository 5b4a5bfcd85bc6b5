// Database entities
pub mod item;
