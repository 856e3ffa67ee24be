mod external;
mod item;

pub use external::*;
pub use item::*;
