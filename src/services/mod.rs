//! Domain services behind the HTTP routes.
//!
//! Each service takes a `&PgPool` and the acting owner's id and returns
//! `Result<_, WallError>`; the route layer maps errors to status codes.

pub mod item;
pub mod photo;
pub mod share;
pub mod wall;
