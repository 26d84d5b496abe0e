//! Shared test harness modules for the Enclave CLI.

use super::*;

mod unit;
