//! Various unsorted logical operators.

pub(crate) use self::c_order::{c_order_index, c_order_key};
pub(crate) use self::consts::*;

mod c_order;
mod consts;
pub mod hashmap;
