//! Utility functions for landmark coordinate conversion.

pub mod safe_cast;
