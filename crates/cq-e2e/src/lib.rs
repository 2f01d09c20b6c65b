//! No production code; see `tests/` for the end-to-end pipeline suite.
