//! # Outbreak Entry Point
//!
//! All setup, event handling, and rendering is managed by [`outbreak::app`];
//! see the `lib.rs` module documentation for the architecture overview.

fn main() {
    outbreak::app::run();
}
