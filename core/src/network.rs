pub mod connect;
pub mod resolver;
