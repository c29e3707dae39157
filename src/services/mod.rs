// Service module exports

pub mod countdown;
pub mod database;
pub mod event;
pub mod feed;
pub mod listing;
pub mod settings;
