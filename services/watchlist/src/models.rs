//! Records and request payloads for the watchlist service

pub mod show;
pub mod user;

pub use show::{GenreFilter, NewShow, Show, UpdateShow};
pub use user::{AddShowRequest, NewUser, UpdateUser, User};
