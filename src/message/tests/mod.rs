//! Unit tests for the messaging subsystem.

mod access_tests;
