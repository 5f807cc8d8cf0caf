//! Port acquisition on loopback sockets
//!
//! Two independent strategies, chosen by whether a range is given:
//! - [`ephemeral`] binds a whole batch to port 0 at once and lets the kernel
//!   pick, which rules out duplicates within the batch.
//! - [`range`] try-binds exact ports of a closed interval from a random
//!   starting point.

pub mod addr;
pub mod ephemeral;
pub mod limits;
pub mod probe;
pub mod range;

pub use ephemeral::acquire_ephemeral;
pub use probe::ProbeSocket;
pub use range::{acquire_in_range, scan_range, LoopbackProbe, PortProbe};
