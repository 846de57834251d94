// Exported functions
pub use self::price::action_price;

// Submodules
mod price;
