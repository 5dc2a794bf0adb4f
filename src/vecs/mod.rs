pub mod ordered_sequence;
