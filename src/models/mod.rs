pub mod favorite;
pub mod response;
pub mod user;
pub mod weather;
