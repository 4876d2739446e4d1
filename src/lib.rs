// Library for tests to access modules

pub mod config;
pub mod display;
pub mod link_speed;
pub mod models;
pub mod sampler;
pub mod terminal;
pub mod version;
pub mod worker;
