pub mod complete;
pub mod decide;
pub mod models;
