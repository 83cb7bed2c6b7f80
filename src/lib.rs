#![allow(async_fn_in_trait)]

pub mod cli;
pub mod config;
pub mod entities;
pub mod error;
pub mod logging;
pub mod media;
pub mod seed;
pub mod storage;
pub mod store;
pub mod utils;
pub mod web_ui;
