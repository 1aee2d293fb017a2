pub mod cities;
pub mod queries;
