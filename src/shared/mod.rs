pub mod date;
pub mod geo;
pub mod line_code;

pub use geo::*;

pub trait Identifiable {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
}
