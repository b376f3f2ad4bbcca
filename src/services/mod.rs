//! Service layer separating codec and filter concerns from business logic

pub mod io;

pub use io::ImageCodec;
