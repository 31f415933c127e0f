pub mod addr;
pub mod interface;
