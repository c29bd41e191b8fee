//! End-to-end tests for logtail live under `tests/`; this crate has no runtime code.
