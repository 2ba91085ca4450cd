//! Chat module - the message entity and the exchange pairing.

mod message;

pub use message::{Author, Exchange, NewMessage, StoredMessage};
