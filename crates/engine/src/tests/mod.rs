// Test module for the engine
//
// Unit tests grouped by operation: canonical simplification, calculus,
// linear systems, matrix algebra and error reporting.

mod error_tests;
mod matrix_tests;
mod simplify_tests;
mod solve_tests;
