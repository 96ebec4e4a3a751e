// src/models/mod.rs

pub mod answer;
pub mod chat;
pub mod question;
pub mod subject;
pub mod view;
