mod author;
mod element;
mod message;
mod payload;
mod product;

pub use author::*;
pub use element::*;
pub use message::*;
pub use payload::*;
pub use product::*;
