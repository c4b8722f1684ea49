//! End-to-end orchestration tests: the real engine against stub scanner scripts.
#![cfg(all(test, unix))]

mod orchestration;
mod stub;
