//! Tests for the k-means engine.

mod helpers;
