pub mod disease;
pub mod fertilizer;
pub mod health;
pub mod plants;
pub mod soil;
