mod action;
mod requests;
mod types;

pub use action::OrderAction;
pub use requests::{
    CreateOrderRequest, OrderKeyRequest, SendConfirmationRequest, UpdateOrderRequest,
};
pub use types::{Order, OrderPatch};
