pub mod seat;
pub mod strain;
pub mod call;
pub mod grammar;
pub mod label;
pub mod auction;

pub use seat::{Seat, Side};
pub use strain::Strain;
pub use call::{Call, ParseCallError};
pub use grammar::{CallGrammar, GrammarConfig, GrammarError};
pub use auction::{Auction, AuctionEntry};
