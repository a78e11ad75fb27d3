pub mod reversible_operation;
