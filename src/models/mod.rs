pub mod ride;

pub use ride::{RideApp, RideOffer};
