pub mod doctor;
pub mod load;
pub mod lookup;
