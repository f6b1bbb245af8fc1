pub mod data;
pub mod fanout;
pub mod hit_rate;
pub mod names;
pub mod validate;
