// Test module for the calculator page
//
// Unit tests for the keypad, formatter, form builder, tab controller and
// event dispatch, plus property tests for the invariants they share.

mod forms_tests;
mod tabs_tests;
