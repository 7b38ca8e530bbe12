//! Property-based tests for classification, criteria and ranking.
