pub mod export;
pub mod rooms;
