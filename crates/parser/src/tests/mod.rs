// Test module for parser
//
// Unit tests for the expression, equation and keypad grammars.
// Tests are organized by category to cover AST construction and error reporting.

mod expr_tests;
mod precedence_tests;
