#![allow(dead_code)]

pub mod asset_server;
pub mod fixtures;
