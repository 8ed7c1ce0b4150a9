pub mod users;

pub use users::{InMemoryUserService, SignInError, UserService, UserServiceError};
