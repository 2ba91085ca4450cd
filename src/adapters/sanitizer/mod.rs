//! Sanitizer adapters.

mod markup_stripper;

pub use markup_stripper::MarkupStripper;
