//! HTTP host for the access guards: identity middleware, guarded admin pages,
//! session and RBAC endpoints.

pub mod app;
pub mod config;
pub mod context;
pub mod jwt;
pub mod middleware;
