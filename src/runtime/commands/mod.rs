pub mod boxes;
pub mod items;
pub mod search;
pub mod shared;
