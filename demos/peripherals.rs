//! Example: a driver's list of discovered peripherals.
//!
//! This example shows how to:
//! - Subscribe to item-added notifications
//! - Append discovered devices one at a time and in batches
//! - Guard a check-then-append sequence with the sync handle
//! - Unsubscribe, explicitly and by dropping a scoped subscription
//!
//! Run with: cargo run --example peripherals

use notifying_list::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, PartialEq)]
struct Peripheral {
    vendor_id: u16,
    product_id: u16,
    product: &'static str,
}

fn main() -> Result<()> {
    println!("=== Peripheral List Example ===\n");

    let devices = Arc::new(NotifyingList::<Peripheral>::new());
    let notifications = Arc::new(AtomicUsize::new(0));

    let watcher = Arc::downgrade(&devices);
    let notifications_clone = Arc::clone(&notifications);
    let logger = devices.subscribe(move || {
        let count = notifications_clone.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(devices) = watcher.upgrade() {
            println!(
                "[Logger] notification #{}: {} device(s) attached",
                count,
                devices.len()
            );
        }
    });

    let scoped = devices.subscribe_scoped(|| {
        println!("[Hotplug] something was plugged in");
    });

    println!("--- Single device ---");
    devices.append_one(Peripheral {
        vendor_id: 0x046d,
        product_id: 0xc31c,
        product: "keyboard",
    })?;

    println!("\n--- Enumeration batch ---");
    devices.append_many([
        Peripheral {
            vendor_id: 0x046d,
            product_id: 0xc077,
            product: "mouse",
        },
        Peripheral {
            vendor_id: 0x045e,
            product_id: 0x028e,
            product: "gamepad",
        },
    ])?;

    println!("\n--- Dropping the hotplug subscription ---");
    drop(scoped);

    println!("\n--- Guarded check-then-append ---");
    let tablet = Peripheral {
        vendor_id: 0x056a,
        product_id: 0x0357,
        product: "tablet",
    };
    for _ in 0..2 {
        let _guard = devices.sync_handle().lock();
        if !devices.contains(&tablet) {
            devices.append_one(tablet.clone())?;
        } else {
            println!("tablet already known, skipped");
        }
    }

    devices.unsubscribe(logger);
    devices.append_one(Peripheral {
        vendor_id: 0x0781,
        product_id: 0x5581,
        product: "flash drive",
    })?;

    println!("\nKnown devices:");
    for device in devices.read().iter() {
        println!(
            "  {:04x}:{:04x} {}",
            device.vendor_id, device.product_id, device.product
        );
    }

    println!(
        "\nLogger saw {} notification(s)",
        notifications.load(Ordering::SeqCst)
    );

    Ok(())
}
