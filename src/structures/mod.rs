pub mod hash_table;
pub mod poly;
pub mod term;
pub mod universal;
