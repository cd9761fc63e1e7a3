//! Unit tests for the planning rules.
