pub mod auth_ctx;
pub mod path_id;

pub use auth_ctx::{AuthCtx, Credentials};
pub use path_id::CompanyId;
