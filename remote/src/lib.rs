pub mod errors;
pub mod invoker;
pub mod models;
pub mod naming;
pub mod notation;
pub mod paper;
pub mod service;

pub use errors::{RemoteError, Result};
pub use invoker::{RemoteInvoker, MAX_ATTEMPTS};
pub use models::{
    DetailedPnlEntry, Order, OrderSide, OrderStatus, OrderType, TimeInForce, Transaction,
    TransactionAction,
};
pub use naming::{check_identifier, is_valid_identifier};
pub use notation::{display_symbol, wire_symbol};
pub use paper::{PaperChannelFactory, PaperStrategy};
pub use service::{ChannelFactory, GoalsStrategy};
