//! Balance simulator for Button Clicker.
//! Run with: cargo test simulate_greedy -- --nocapture
