pub mod icon;
pub mod writer;

pub use icon::render_crosshair_icon;
pub use writer::write_point_placemark;
