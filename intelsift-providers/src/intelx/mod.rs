//! IntelX phonebook search.
//!
//! The phonebook service processes searches asynchronously: a submit call
//! returns an opaque token, and results are polled by token after a
//! mandatory settling delay. The protocol module drives that state machine
//! over a transport seam so it can be tested without a network.

pub(crate) mod parser;
mod protocol;
mod transport;

pub use protocol::{PhonebookSearch, SearchState, SearchToken};
pub use transport::{HttpSearchTransport, SearchTransport, WireReply};
