//! Ready-made machine definitions for common storefront flows.

pub mod async_operation;
pub mod checkout;
pub mod modal;

pub use async_operation::{async_operation_machine, AsyncContext, AsyncEvent, AsyncMachine, AsyncState};
pub use checkout::{
    checkout_machine, CartItem, CheckoutContext, CheckoutEvent, CheckoutMachine, CheckoutState,
    PaymentMethod, ShippingAddress,
};
pub use modal::{modal_machine, ModalContext, ModalEvent, ModalMachine, ModalState};
