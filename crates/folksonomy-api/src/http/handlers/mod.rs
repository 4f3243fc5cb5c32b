//! Request handlers, one module per admin model.

pub mod admin;
pub mod category;
pub mod skill;
pub mod tag;
pub mod user;
pub mod user_skill;
