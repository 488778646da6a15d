#[path = "../crates/types/src/lib.rs"]
pub mod types;
#[path = "../crates/core/src/lib.rs"]
pub mod core;
#[path = "../crates/transports/reqwest/src/lib.rs"]
pub mod transport_reqwest;
#[path = "../crates/client/src/lib.rs"]
pub mod client;

pub mod transports {
    pub use crate::transport_reqwest as reqwest;
}

pub(crate) use crate::core as dalle_core;
pub(crate) use crate::transport_reqwest as reqwest_transport;
pub(crate) use crate::types as dalle_types;
