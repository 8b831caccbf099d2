pub mod residue;
pub mod surface;
