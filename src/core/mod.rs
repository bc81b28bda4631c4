pub mod movie;
pub mod photodiode;
