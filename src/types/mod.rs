pub mod series;
pub mod track;
pub mod units;
