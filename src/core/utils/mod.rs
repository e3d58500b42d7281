pub mod buf;

mod tests;
