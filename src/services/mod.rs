// Services layer - Business logic and orchestration
pub mod item_service;

pub use item_service::ItemService;
