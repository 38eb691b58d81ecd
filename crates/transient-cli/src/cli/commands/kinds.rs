//! `transient kinds` – list transport statuses.

use transient_core::retry::TransportStatus;

pub fn run_kinds() {
    println!("{:<36} {}", "KIND", "TRANSIENT");
    for status in TransportStatus::ALL {
        let transient = if status.is_transient() { "yes" } else { "no" };
        println!("{:<36} {}", status, transient);
    }
}
