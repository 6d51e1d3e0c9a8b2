/// The dictionary of script defined words, and the index of names bound to data space addresses.
pub mod dictionary;

/// The byte addressed arena backing script variables, and the cell type used throughout.
pub mod data_space;
