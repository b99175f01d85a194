pub mod address;
pub mod booster;
pub mod card;
pub mod collection;

pub use address::*;
pub use booster::*;
pub use card::*;
pub use collection::*;
