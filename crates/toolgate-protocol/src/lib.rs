//! # toolgate-protocol
//!
//! Wire format for toolgate: the JSON-RPC 2.0 request/response envelope,
//! the closed error-code taxonomy, the method table and the parameter
//! shapes of the built-in methods.

pub mod envelope;
pub mod methods;
pub mod params;

pub use envelope::*;
pub use methods::Method;
pub use params::*;
