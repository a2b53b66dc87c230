mod index;

pub use index::{health, index_handler, ROUTE_LISTING};
