// src/handlers/mod.rs

pub mod chat;
pub mod docs;
pub mod practice;
pub mod subject;
pub mod year;
