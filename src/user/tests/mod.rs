//! Unit tests for the user subsystem.

mod service_tests;
