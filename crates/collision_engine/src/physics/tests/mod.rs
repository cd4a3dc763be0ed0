//! Pipeline scenarios: pose update, broad phase, narrow phase and resolution together
