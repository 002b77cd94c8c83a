mod determinism_tests;
mod ranking_tests;
