pub mod batch;
pub mod data_core;
pub mod key_builder;
pub mod marker;
pub mod merger;
pub mod special_rules;
