//! Checkout Flow
//!
//! This example walks a shopper through the checkout machine, including a
//! declined card and a retry.
//!
//! Key concepts:
//! - Driving a flow with `Runtime::send`
//! - Asking the runtime what the UI may offer (`can`, `next_events`)
//! - Running the payment call as an effect and sending its outcome
//! - Checkpointing the flow and resuming it
//!
//! Run with: cargo run --example checkout_flow

use flowstate::checkpoint::Checkpoint;
use flowstate::machines::{
    checkout_machine, CartItem, CheckoutContext, CheckoutEvent, CheckoutState, PaymentMethod,
    ShippingAddress,
};
use flowstate::runtime::Runtime;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use stillwater::effect::Effect;
use stillwater::prelude::*;

// Payment service double: declines the first charge, accepts the rest
#[derive(Clone, Default)]
struct PaymentGateway {
    attempts: Arc<AtomicU32>,
}

fn charge(
    total_cents: u64,
) -> impl Effect<Output = CheckoutEvent, Error = CheckoutEvent, Env = PaymentGateway> {
    from_fn(move |gateway: &PaymentGateway| -> Result<CheckoutEvent, CheckoutEvent> {
        let attempt = gateway.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        println!("  [Payment] Charging {total_cents} cents (attempt {attempt})");

        if attempt == 1 {
            Err(CheckoutEvent::Error {
                message: "card declined".to_string(),
            })
        } else {
            Ok(CheckoutEvent::Success {
                order_id: format!("ORD-{}", 1000 + attempt),
            })
        }
    })
}

fn show(checkout: &Runtime<CheckoutState, CheckoutContext, CheckoutEvent>) {
    println!(
        "  state: {:?}, offers: {:?}",
        checkout.value(),
        checkout.next_events()
    );
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    println!("=== Checkout Flow ===\n");

    let machine = Arc::new(checkout_machine(CheckoutContext::default()).unwrap());
    let mut checkout = Runtime::new(Arc::clone(&machine));
    show(&checkout);

    println!("\n1. Empty cart cannot proceed");
    checkout.send(CheckoutEvent::Proceed);
    show(&checkout);

    println!("\n2. Fill the cart and enter details");
    checkout.send(CheckoutEvent::AddItem(CartItem {
        id: "mug".into(),
        name: "Enamel mug".into(),
        price_cents: 1450,
        quantity: 2,
    }));
    checkout.send(CheckoutEvent::Proceed);
    checkout.send(CheckoutEvent::ShippingEntered(ShippingAddress {
        name: "Ada Lovelace".into(),
        street: "12 St James's Square".into(),
        city: "London".into(),
        postal_code: "SW1Y 4JH".into(),
        country: "GB".into(),
    }));
    checkout.send(CheckoutEvent::PaymentChosen(PaymentMethod::Card {
        last4: "4242".into(),
    }));
    show(&checkout);

    println!("\n3. Checkpoint before submitting");
    let saved = checkout.checkpoint().to_json().unwrap();
    println!("  saved {} bytes", saved.len());

    println!("\n4. Submit, get declined, retry");
    let gateway = PaymentGateway::default();
    let total = checkout.context().total_cents();
    checkout.send(CheckoutEvent::Submit);
    checkout.dispatch(charge(total), &gateway).await;
    println!("  error: {:?}", checkout.context().error);
    show(&checkout);

    checkout.send(CheckoutEvent::Retry);
    checkout.send(CheckoutEvent::Submit);
    checkout.dispatch(charge(total), &gateway).await;
    show(&checkout);
    println!(
        "  order: {:?}, final: {}",
        checkout.context().order_id,
        checkout.is_final()
    );

    println!("\n5. Resume the saved flow");
    let checkpoint = Checkpoint::from_json(&saved).unwrap();
    let resumed = Runtime::resume(machine, checkpoint).unwrap();
    show(&resumed);
    println!("  path: {:?}", resumed.history().get_path());

    println!("\n=== Flow Complete ===");
}
