//! Contains coordinates, bounding boxes and the tile numbering scheme.

mod geo_bbox;
pub use geo_bbox::*;

mod mercator_bbox;
pub use mercator_bbox::*;

mod points;
pub use points::*;

mod tile_bbox;
pub use tile_bbox::*;

mod tile_coord;
pub use tile_coord::*;

mod tile_scheme;
pub use tile_scheme::*;
