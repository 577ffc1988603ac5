pub mod admin;
pub mod rbac;
pub mod session;
pub mod system;
