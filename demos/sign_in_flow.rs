//! Sign In Flow
//!
//! This demo walks a first launch through onboarding, sign-up, a failed
//! sign-in and a saved transaction, against the in-memory collaborators.
//!
//! Key concepts:
//! - Route gating through the session controller
//! - Remote errors held until acknowledged
//! - Editor drafts validated on submit
//!
//! Run with: RUST_LOG=smartmoney=debug cargo run --example sign_in_flow

use smartmoney::clock::SystemClock;
use smartmoney::logging::init_logging;
use smartmoney::navigation::{RecordingNavigator, Route};
use smartmoney::onboarding::OnboardingPager;
use smartmoney::session::{InMemoryIdentityService, SessionController};
use smartmoney::transactions::{
    format_signed, DraftField, InMemoryTransactionStore, TransactionEditor, TransactionStore,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging("smartmoney=info")?;
    println!("=== Sign In Flow Demo ===\n");

    let identity = Arc::new(InMemoryIdentityService::new());
    let nav = Arc::new(RecordingNavigator::new());
    let controller = SessionController::new(Arc::clone(&identity), Arc::clone(&nav));

    println!("Scenario 1: First launch");
    println!("  Start route: {:?}", controller.start_route());
    let mut pager = OnboardingPager::new(Arc::clone(&nav));
    println!("  Skipped onboarding: {:?}", pager.skip());
    println!("  Intents: {:?}\n", nav.drain());

    println!("Scenario 2: Sign up");
    let session = controller
        .sign_up("Alex Johnson", "alex@example.com", "Secret123", "Secret123")
        .await?;
    if let Some(user) = session.user() {
        println!("  Welcome, {}", user.first_name());
    }
    println!("  Insights tab opens: {:?}\n", controller.gate(Route::Insights));

    println!("Scenario 3: Wrong password after signing out");
    controller.sign_out().await?;
    if let Err(err) = controller.sign_in("alex@example.com", "nope").await {
        println!("  Alert: {}", err.user_message());
    }
    println!("  Status: {:?}", controller.status());
    controller.acknowledge_error();
    println!("  After dismissing: {:?}", controller.status());
    controller.sign_in("alex@example.com", "Secret123").await?;
    println!("  Signed back in: {}\n", controller.is_authenticated());

    println!("Scenario 4: Add a transaction");
    let store = Arc::new(InMemoryTransactionStore::with_sample_data(&SystemClock));
    let mut editor = TransactionEditor::new(Arc::clone(&store), SystemClock);
    editor.open();
    editor.set_field(DraftField::Title, "Coffee")?;
    editor.set_field(DraftField::Amount, "1,250.50")?;
    editor.select_category("Food")?;
    let record = editor.submit().await?;
    println!(
        "  Saved {} {}",
        record.label,
        format_signed(record.amount_minor, "₦", 2)
    );
    for record in store.list().await? {
        println!(
            "  {:<22} {:>14}",
            record.label,
            format_signed(record.amount_minor, "₦", 2)
        );
    }

    println!("\nNavigation intents: {:?}", nav.intents());
    Ok(())
}
