pub mod channel_sender;

pub use channel_sender::{DeliveryError, EmailSender, LineMessage, LineSender};
