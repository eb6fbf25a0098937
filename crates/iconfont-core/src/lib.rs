pub mod config;
pub mod logging;

pub mod embed;
pub mod fetch;
pub mod inject;
pub mod materialize;
pub mod resolver;
pub mod rewrite;
pub mod url_model;
