// Library for tests and demos to access modules

pub mod charts;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod summary_repo;
