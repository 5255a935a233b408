pub mod errors;
pub mod srs;
pub mod config;
pub mod poly;

pub mod member;
pub mod share;
pub mod pvsh;
pub mod dealer;
pub mod combiner;
pub mod wire;
