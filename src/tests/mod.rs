pub mod fixtures;

mod layer_tests;
mod mixture_tests;
mod network_tests;
mod quantity_tests;
