pub mod model;
pub mod ports;
pub mod repository;
pub mod search;
pub mod seed;
pub mod store;
pub mod view;
