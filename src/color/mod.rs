pub mod bayer;
pub mod channel;
