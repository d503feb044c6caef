//! Record types for trace service data
//!
//! Structure:
//! - `event.rs` - Events recorded against item tags
//! - `location.rs` - Location master data and role vocabulary
//! - `product.rs` - Product master data
//! - `epc.rs` - Item tag decoding into product identities

pub mod epc;
pub mod event;
pub mod location;
pub mod product;

pub use epc::{ProductIdentity, decode_item_tag};
pub use event::{Event, EventType};
pub use location::{Location, LocationRole};
pub use product::Product;
