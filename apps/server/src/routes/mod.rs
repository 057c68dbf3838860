//! HTTP route handlers

pub mod card;
pub mod session;
pub mod vocabulary;
