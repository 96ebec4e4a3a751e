// src/utils/mod.rs

pub mod extract;
pub mod html;
pub mod role;
pub mod slug;
