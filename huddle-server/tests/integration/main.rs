mod connection_tests;
mod e2e_tests;
mod messaging_tests;
mod utils;
