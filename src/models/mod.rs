//! Domain model module declarations.

pub mod record;
pub mod route;
pub mod tag;
