pub mod icons;
pub mod model;
pub mod view;

pub use icons::IconCache;
pub use model::Preview;
pub use view::draw;

pub const ICON_SIZE: i32 = 128; // pixbuf load size, scaled down per sector
pub const LINE_WIDTH: f64 = 1.5;
pub const LABEL_FONT_SIZE: f64 = 13.0;
