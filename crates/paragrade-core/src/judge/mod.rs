pub mod dispatch;
pub mod normalize;
pub mod parse;

pub use dispatch::{judge_pairs, warmup, Strategy};
pub use normalize::{decode_verdict, normalize_bool};
