// Library for tests to access modules

pub mod config;
pub mod dates;
pub mod db;
pub mod models;
pub mod report;
pub mod version;
