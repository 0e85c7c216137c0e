//! HTTP API handlers for classify-catalog

pub mod books;
pub mod deadline;
pub mod health;
pub mod params;
pub mod search;

pub use books::book_routes;
pub use health::health_routes;
pub use params::RequestParams;
pub use search::search_routes;
