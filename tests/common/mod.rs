//! Common test utilities for cruraster.
//!
//! This module provides shared utilities for testing the conversion pipeline.

#![allow(dead_code)]

pub mod assertions;
pub mod image_utils;
pub mod test_data;
