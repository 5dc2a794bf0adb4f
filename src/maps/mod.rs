pub mod ordered_map;
