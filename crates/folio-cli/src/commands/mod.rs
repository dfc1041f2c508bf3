pub mod coverage;
pub mod dispatch;
pub mod generate;
pub mod manifest;
pub mod shared;
pub mod topics;
