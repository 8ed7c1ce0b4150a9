//! Domain layer: account records independent of transport.

pub mod user;

pub use user::{NewUser, User, UserProfile};
