mod keyboard_view;
mod main_view;

pub use main_view::draw_main_view;
