pub mod current_user;
pub mod user_id;
pub mod validated_json;

pub use current_user::{AuthenticatedUserId, CurrentUser};
pub use user_id::UserIdPath;
pub use validated_json::ValidatedJson;
