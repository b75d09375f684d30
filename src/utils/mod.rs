pub mod fixed_point;
pub mod hash_table;
