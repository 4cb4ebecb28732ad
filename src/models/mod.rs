mod priority;
mod work_order;

pub use priority::*;
pub use work_order::*;
