#![allow(dead_code)]

pub mod factory;

// Re-export only what current tests actually import
pub use app_builder::create_test_app;
pub use factory::test_state_builder;
