//! Checkout flow: cart, shipping, payment, review, then order submission.
//!
//! ```text
//! cart -> shipping -> payment -> review -> processing -> complete
//!                        ^          ^          |
//!                        |          +- retry --+-> error
//!                        +------- back --------------+
//! ```
//!
//! Payment submission itself is the host's job: it watches for
//! `processing`, calls the payment service, and sends `SUCCESS` or `ERROR`.

use crate::core::{Action, Event};
use crate::definition::{BuildError, MachineBuilder, MachineDefinition, StateNode, TransitionBuilder};
use crate::state_enum;
use serde::{Deserialize, Serialize};

state_enum! {
    pub enum CheckoutState {
        Cart = "cart",
        Shipping = "shipping",
        Payment = "payment",
        Review = "review",
        Processing = "processing",
        Complete = "complete",
        Error = "error",
    }
    final: [Complete]
    error: [Error]
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price_cents: u64,
    pub quantity: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub name: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Card { last4: String },
    PayPal { email: String },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutContext {
    pub items: Vec<CartItem>,
    pub shipping: Option<ShippingAddress>,
    pub payment: Option<PaymentMethod>,
    pub order_id: Option<String>,
    pub error: Option<String>,
}

impl CheckoutContext {
    pub fn with_items(items: Vec<CartItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn total_cents(&self) -> u64 {
        self.items.iter().fold(0u64, |total, item| {
            total.saturating_add(item.price_cents.saturating_mul(u64::from(item.quantity)))
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CheckoutEvent {
    AddItem(CartItem),
    RemoveItem { id: String },
    Proceed,
    /// `NEXT` from shipping, carrying the entered address
    ShippingEntered(ShippingAddress),
    /// `NEXT` from payment, carrying the chosen method
    PaymentChosen(PaymentMethod),
    Back,
    Submit,
    Success { order_id: String },
    Error { message: String },
    Retry,
    Cancel,
}

impl Event for CheckoutEvent {
    fn event_type(&self) -> &str {
        match self {
            Self::AddItem(_) => "ADD_ITEM",
            Self::RemoveItem { .. } => "REMOVE_ITEM",
            Self::Proceed => "PROCEED",
            Self::ShippingEntered(_) | Self::PaymentChosen(_) => "NEXT",
            Self::Back => "BACK",
            Self::Submit => "SUBMIT",
            Self::Success { .. } => "SUCCESS",
            Self::Error { .. } => "ERROR",
            Self::Retry => "RETRY",
            Self::Cancel => "CANCEL",
        }
    }
}

pub type CheckoutMachine = MachineDefinition<CheckoutState, CheckoutContext, CheckoutEvent>;

fn add_item(mut ctx: CheckoutContext, event: &CheckoutEvent) -> CheckoutContext {
    if let CheckoutEvent::AddItem(item) = event {
        match ctx.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
            None => ctx.items.push(item.clone()),
        }
    }
    ctx
}

fn remove_item(mut ctx: CheckoutContext, event: &CheckoutEvent) -> CheckoutContext {
    if let CheckoutEvent::RemoveItem { id } = event {
        ctx.items.retain(|item| item.id != *id);
    }
    ctx
}

fn store_shipping(mut ctx: CheckoutContext, event: &CheckoutEvent) -> CheckoutContext {
    if let CheckoutEvent::ShippingEntered(address) = event {
        ctx.shipping = Some(address.clone());
    }
    ctx
}

fn store_payment(mut ctx: CheckoutContext, event: &CheckoutEvent) -> CheckoutContext {
    if let CheckoutEvent::PaymentChosen(method) = event {
        ctx.payment = Some(method.clone());
    }
    ctx
}

fn store_order(mut ctx: CheckoutContext, event: &CheckoutEvent) -> CheckoutContext {
    if let CheckoutEvent::Success { order_id } = event {
        ctx.order_id = Some(order_id.clone());
    }
    ctx
}

fn store_error(mut ctx: CheckoutContext, event: &CheckoutEvent) -> CheckoutContext {
    if let CheckoutEvent::Error { message } = event {
        ctx.error = Some(message.clone());
    }
    ctx
}

fn clear_error(ctx: CheckoutContext) -> CheckoutContext {
    CheckoutContext { error: None, ..ctx }
}

/// Checkout machine starting from `initial_context` in `cart`.
pub fn checkout_machine(initial_context: CheckoutContext) -> Result<CheckoutMachine, BuildError> {
    use CheckoutState::*;

    let cart = StateNode::new()
        .on_transition(
            "ADD_ITEM",
            TransitionBuilder::new().to(Cart).assign_with_event(add_item),
        )?
        .on_transition(
            "REMOVE_ITEM",
            TransitionBuilder::new().to(Cart).assign_with_event(remove_item),
        )?
        .on_transition(
            "PROCEED",
            TransitionBuilder::new()
                .to(Shipping)
                .when(|ctx: &CheckoutContext| !ctx.items.is_empty()),
        )?;

    let shipping = StateNode::new()
        .on_transition(
            "NEXT",
            TransitionBuilder::new()
                .to(Payment)
                .assign_with_event(store_shipping),
        )?
        .on("BACK", Cart);

    let payment = StateNode::new()
        .on_transition(
            "NEXT",
            TransitionBuilder::new().to(Review).assign_with_event(store_payment),
        )?
        .on("BACK", Shipping);

    let review = StateNode::new()
        .entry(Action::new(clear_error))
        .on("SUBMIT", Processing)
        .on("BACK", Payment);

    let processing = StateNode::new()
        .on_transition(
            "SUCCESS",
            TransitionBuilder::new().to(Complete).assign_with_event(store_order),
        )?
        .on_transition(
            "ERROR",
            TransitionBuilder::new().to(Error).assign_with_event(store_error),
        )?
        .on("CANCEL", Review);

    let error = StateNode::new().on("RETRY", Review).on("BACK", Payment);

    MachineBuilder::new("checkout")
        .initial(Cart)
        .context(initial_context)
        .state(Cart, cart)
        .state(Shipping, shipping)
        .state(Payment, payment)
        .state(Review, review)
        .state(Processing, processing)
        .terminal(Complete)
        .state(Error, error)
        .build()
}
