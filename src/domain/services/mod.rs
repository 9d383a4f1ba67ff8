mod app_state;
mod bubble;
mod bubble_list;
mod conversation;
mod conversation_log;
mod product_card;
mod product_parser;
mod scroll;

pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use conversation::*;
pub use conversation_log::*;
pub use product_card::*;
pub use product_parser::*;
pub use scroll::*;
